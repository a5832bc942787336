//! End-to-end tests from raw query strings to resolved filter specs.

use query_filter::{
    parse_to_ids, EntityKind, FilterResolver, IdFilter, ParameterBag, ParameterError,
    QueryFilterSpec, SpatialFilterResolver, Vicinity, IMPOSSIBLE_ID,
};
use sensor_common::{BoundingBox, Point, SpatialError};
use test_utils::{assert_approx_eq, bbox, crs, near, queries, query_pairs, token_combinations};

fn bag(query: &str) -> ParameterBag {
    ParameterBag::from_pairs(query_pairs(query))
}

fn spec(query: &str) -> Result<QueryFilterSpec, ParameterError> {
    QueryFilterSpec::from_parameters(&bag(query))
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_no_axis_parameters() {
    let spec = spec(queries::EMPTY).unwrap();
    assert!(spec.shall_include_all_platform_types());
    assert!(!spec.is_pure_stationary_insitu_query());
}

#[test]
fn test_stationary_insitu_measurement_is_pure() {
    let spec = spec(queries::STATIONARY_INSITU_MEASUREMENT).unwrap();
    assert!(spec.is_pure_stationary_insitu_query());
    assert!(!spec.backwards_compatible);
}

#[test]
fn test_mobile_only() {
    let resolver = FilterResolver::from_parameters(&bag(queries::MOBILE_ONLY));
    assert!(resolver.shall_include_mobile_platform_types());
    assert!(!resolver.shall_include_stationary_platform_types());
    assert!(resolver.shall_include_insitu_platform_types());
}

#[test]
fn test_bbox_only_is_unchanged() {
    let query = r#"bbox={"ll":{"x":0,"y":0},"ur":{"x":10,"y":10}}"#;
    let spec = spec(query).unwrap();
    assert_eq!(spec.spatial_filter, Some(BoundingBox::new(0.0, 0.0, 10.0, 10.0)));
}

#[test]
fn test_legacy_offering_folds_into_offerings() {
    let spec = spec(queries::LEGACY_OFFERING).unwrap();
    let offerings: Vec<&IdFilter> = spec.id_filters_of(EntityKind::Offering).collect();
    assert_eq!(offerings.len(), 1);
    assert_eq!(
        *offerings[0].id_set().ids(),
        ["5".to_string()].into_iter().collect()
    );
}

#[test]
fn test_negative_limit_is_rejected() {
    let err = spec(queries::NEGATIVE_LIMIT).unwrap_err();
    assert_eq!(
        err,
        ParameterError::NegativeValue {
            param: "limit".to_string(),
            value: -3
        }
    );
    assert_eq!(err.status_code(), 400);
    assert_eq!(err.to_exception().parameter.as_deref(), Some("limit"));
}

// ============================================================================
// Axis properties
// ============================================================================

#[test]
fn test_default_inclusion_without_tokens() {
    let resolver = FilterResolver::from_parameters(&ParameterBag::empty());
    assert!(resolver.shall_include_stationary_platform_types());
    assert!(resolver.shall_include_mobile_platform_types());
    assert!(resolver.shall_include_insitu_platform_types());
    assert!(resolver.shall_include_remote_platform_types());
}

#[test]
fn test_all_token_dominates_every_combination() {
    for combo in token_combinations(&["stationary", "mobile", "insitu", "remote"]) {
        let query = format!("filter_platform_types=all,{combo}");
        let resolver = FilterResolver::from_parameters(&bag(&query));
        assert!(resolver.shall_include_all_platform_types(), "{query}");
        assert!(resolver.shall_include_stationary_platform_types(), "{query}");
        assert!(resolver.shall_include_mobile_platform_types(), "{query}");
        assert!(resolver.shall_include_insitu_platform_types(), "{query}");
        assert!(resolver.shall_include_remote_platform_types(), "{query}");
    }
}

#[test]
fn test_each_axis_keeps_at_least_one_value() {
    for combo in token_combinations(&["stationary", "mobile", "insitu", "remote"]) {
        let query = format!("filter_platform_types={combo}");
        let resolver = FilterResolver::from_parameters(&bag(&query));
        assert!(
            resolver.shall_include_stationary_platform_types()
                || resolver.shall_include_mobile_platform_types(),
            "{query}"
        );
        assert!(
            resolver.shall_include_insitu_platform_types()
                || resolver.shall_include_remote_platform_types(),
            "{query}"
        );
    }
}

#[test]
fn test_unfiltered_geometry_includes_site_or_track() {
    let resolver = FilterResolver::from_parameters(&ParameterBag::empty());
    assert!(
        resolver.shall_include_platform_geometries_site()
            || resolver.shall_include_platform_geometries_track()
    );
}

#[test]
fn test_backwards_compatibility_classification() {
    assert!(spec("").unwrap().backwards_compatible);
    assert!(spec("phenomena=1,2").unwrap().backwards_compatible);
    assert!(!spec("filter_platform_types=remote").unwrap().backwards_compatible);
    assert!(!spec("filter_dataset_types=text").unwrap().backwards_compatible);
}

#[test]
fn test_pure_stationary_insitu_needs_exact_sets() {
    assert!(!spec("filter_platform_types=stationary,insitu,mobile&filter_dataset_types=measurement")
        .unwrap()
        .is_pure_stationary_insitu_query());
    assert!(!spec("filter_platform_types=stationary,insitu&filter_dataset_types=measurement,text")
        .unwrap()
        .is_pure_stationary_insitu_query());
    assert!(!spec("filter_platform_types=stationary,insitu")
        .unwrap()
        .is_pure_stationary_insitu_query());
}

#[test]
fn test_legacy_api_applies_implicit_filters() {
    let legacy = QueryFilterSpec::from_legacy_parameters(&bag("phenomena=10")).unwrap();
    assert!(legacy.is_pure_stationary_insitu_query());

    let explicit = QueryFilterSpec::from_legacy_parameters(&bag(queries::MOBILE_ONLY)).unwrap();
    assert!(!explicit.is_pure_stationary_insitu_query());
    assert!(explicit.platform_type_filter.include_mobile);
}

// ============================================================================
// Ids
// ============================================================================

#[test]
fn test_parse_to_ids() {
    let ids = ["5".to_string(), "7".to_string()];
    assert_eq!(parse_to_ids(&ids), [5, 7].into_iter().collect());

    let unparsable = ["abc".to_string()];
    assert_eq!(parse_to_ids(&unparsable), [IMPOSSIBLE_ID].into_iter().collect());
}

#[test]
fn test_unparsable_ids_do_not_fail_the_request() {
    let spec = spec("procedures=abc").unwrap();
    let filter = spec.id_filters_of(EntityKind::Procedure).next().unwrap();
    assert_eq!(
        *filter.id_set().surrogate_ids(),
        [IMPOSSIBLE_ID].into_iter().collect()
    );
}

// ============================================================================
// Spatial
// ============================================================================

#[test]
fn test_bbox_json_and_csv_agree() {
    let json = spec(&format!("bbox={}", bbox::MUENSTERLAND_JSON)).unwrap();
    let csv = spec(&format!("bbox={}", bbox::MUENSTERLAND)).unwrap();
    assert_eq!(json.spatial_filter, csv.spatial_filter);
}

#[test]
fn test_near_with_latlon_center() {
    let lonlat = spec(&format!("near={}", near::MUENSTER_10KM)).unwrap();
    let latlon = spec(&format!("near={}&crs={}", near::MUENSTER_10KM_LATLON, crs::EPSG_4326)).unwrap();

    let a = lonlat.spatial_filter.unwrap();
    let b = latlon.spatial_filter.unwrap();
    assert_approx_eq!(a.min_x, b.min_x, 1e-9);
    assert_approx_eq!(a.max_y, b.max_y, 1e-9);
}

#[test]
fn test_vicinity_covering_bbox_merges_idempotently() {
    let vicinity = Vicinity::new(Point::new(7.6261, 51.9607), 10.0).bounds();
    let query = format!(
        "bbox={},{},{},{}&near={}",
        vicinity.min_x,
        vicinity.min_y,
        vicinity.max_x,
        vicinity.max_y,
        near::MUENSTER_10KM
    );
    let parameters = bag(&query);
    let merged = SpatialFilterResolver::from_parameters(&parameters)
        .unwrap()
        .resolve(&parameters)
        .unwrap();
    assert_eq!(merged, Some(vicinity));
}

#[test]
fn test_unsupported_crs_is_a_parameter_error() {
    let err = spec(&format!("bbox={}&crs={}", bbox::MUENSTERLAND, crs::UNSUPPORTED)).unwrap_err();
    assert!(matches!(err, ParameterError::Spatial(SpatialError::UnsupportedCrs(_))));
    assert_eq!(err.to_exception().title.as_deref(), Some("InvalidCRS"));
}

#[test]
fn test_web_mercator_bbox() {
    let spec = spec(&format!(
        "bbox=-20037508.342789244,-20037508.342789244,20037508.342789244,20037508.342789244&crs={}",
        crs::EPSG_3857
    ))
    .unwrap();
    let bbox = spec.spatial_filter.unwrap();
    assert_approx_eq!(bbox.min_x, -180.0, 1e-6);
    assert_approx_eq!(bbox.max_x, 180.0, 1e-6);
    assert_approx_eq!(bbox.max_y, 85.05112877980659, 1e-6);
}
