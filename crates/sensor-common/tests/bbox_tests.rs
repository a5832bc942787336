//! Comprehensive tests for BoundingBox operations.

use sensor_common::{BoundingBox, CrsCode, Point, SpatialError};

// ============================================================================
// Constructor tests
// ============================================================================

#[test]
fn test_bbox_new() {
    let bbox = BoundingBox::new(-180.0, -90.0, 180.0, 90.0);
    assert_eq!(bbox.min_x, -180.0);
    assert_eq!(bbox.min_y, -90.0);
    assert_eq!(bbox.max_x, 180.0);
    assert_eq!(bbox.max_y, 90.0);
    assert_eq!(bbox.crs, CrsCode::Crs84);
}

#[test]
fn test_bbox_new_swapped_corners() {
    let bbox = BoundingBox::new(10.0, 10.0, 0.0, 0.0);
    assert_eq!(bbox.lower_left(), Point::new(0.0, 0.0));
    assert_eq!(bbox.upper_right(), Point::new(10.0, 10.0));
}

#[test]
fn test_bbox_copy() {
    let bbox1 = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
    let bbox2 = bbox1;
    assert_eq!(bbox1, bbox2);
}

// ============================================================================
// from_csv tests
// ============================================================================

#[test]
fn test_parse_csv_bbox_integer() {
    let bbox = BoundingBox::from_csv("0,0,100,100", CrsCode::Crs84).unwrap();
    assert_eq!(bbox.min_x, 0.0);
    assert_eq!(bbox.max_y, 100.0);
}

#[test]
fn test_parse_csv_bbox_floating() {
    let bbox = BoundingBox::from_csv("-125.5,24.75,-66.25,50.125", CrsCode::Crs84).unwrap();
    assert!((bbox.min_x - (-125.5)).abs() < 0.001);
    assert!((bbox.min_y - 24.75).abs() < 0.001);
    assert!((bbox.max_x - (-66.25)).abs() < 0.001);
    assert!((bbox.max_y - 50.125).abs() < 0.001);
}

#[test]
fn test_parse_csv_bbox_whitespace() {
    let bbox = BoundingBox::from_csv(" 0, 0, 100, 100 ", CrsCode::Crs84).unwrap();
    assert_eq!(bbox.max_x, 100.0);
}

#[test]
fn test_parse_csv_bbox_keeps_crs() {
    let bbox = BoundingBox::from_csv(
        "-20037508.34,-20037508.34,20037508.34,20037508.34",
        CrsCode::Epsg3857,
    )
    .unwrap();
    assert_eq!(bbox.crs, CrsCode::Epsg3857);
    assert!((bbox.max_x - 20037508.34).abs() < 0.01);
}

#[test]
fn test_parse_csv_bbox_too_few() {
    let result = BoundingBox::from_csv("0,0,100", CrsCode::Crs84);
    assert!(matches!(result, Err(SpatialError::InvalidBbox(_))));
}

#[test]
fn test_parse_csv_bbox_too_many() {
    let result = BoundingBox::from_csv("0,0,100,100,200", CrsCode::Crs84);
    assert!(matches!(result, Err(SpatialError::InvalidBbox(_))));
}

#[test]
fn test_parse_csv_bbox_invalid_number() {
    let result = BoundingBox::from_csv("abc,0,100,100", CrsCode::Crs84);
    assert!(matches!(result, Err(SpatialError::InvalidNumber(_))));
}

#[test]
fn test_parse_csv_bbox_empty_string() {
    let result = BoundingBox::from_csv("", CrsCode::Crs84);
    assert!(matches!(result, Err(SpatialError::InvalidBbox(_))));
}

// ============================================================================
// Dimension tests (width/height)
// ============================================================================

#[test]
fn test_bbox_width() {
    let bbox = BoundingBox::new(10.0, 0.0, 30.0, 10.0);
    assert_eq!(bbox.width(), 20.0);
}

#[test]
fn test_bbox_height() {
    let bbox = BoundingBox::new(0.0, 5.0, 10.0, 25.0);
    assert_eq!(bbox.height(), 20.0);
}

#[test]
fn test_bbox_zero_dimensions() {
    let bbox = BoundingBox::new(5.0, 5.0, 5.0, 5.0);
    assert_eq!(bbox.width(), 0.0);
    assert_eq!(bbox.height(), 0.0);
}

// ============================================================================
// Containment and intersection tests
// ============================================================================

#[test]
fn test_bbox_contains_edges() {
    let bbox = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
    assert!(bbox.contains(&Point::new(0.0, 0.0)));
    assert!(bbox.contains(&Point::new(10.0, 10.0)));
    assert!(bbox.contains(&Point::new(5.0, 5.0)));
    assert!(!bbox.contains(&Point::new(10.1, 5.0)));
    assert!(!bbox.contains(&Point::new(5.0, -0.1)));
}

#[test]
fn test_bbox_intersects_overlap() {
    let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
    let b = BoundingBox::new(5.0, 5.0, 15.0, 15.0);
    assert!(a.intersects(&b));
    assert!(b.intersects(&a));
}

#[test]
fn test_bbox_intersects_no_overlap() {
    let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
    let b = BoundingBox::new(20.0, 20.0, 30.0, 30.0);
    assert!(!a.intersects(&b));
}

#[test]
fn test_bbox_intersects_adjacent_edge() {
    // closed intervals: touching counts
    let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
    let b = BoundingBox::new(10.0, 0.0, 20.0, 10.0);
    assert!(a.intersects(&b));
}

// ============================================================================
// extend_by / union tests
// ============================================================================

#[test]
fn test_extend_by_contained_point_is_noop() {
    let bbox = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
    assert_eq!(bbox.extend_by(&Point::new(3.0, 4.0)), bbox);
}

#[test]
fn test_extend_by_uses_each_axis() {
    let bbox = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
    let extended = bbox.extend_by(&Point::new(20.0, -3.0));
    assert_eq!(extended.min_x, 0.0);
    assert_eq!(extended.min_y, -3.0);
    assert_eq!(extended.max_x, 20.0);
    assert_eq!(extended.max_y, 10.0);
}

#[test]
fn test_union_disjoint() {
    let a = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
    let b = BoundingBox::new(5.0, 6.0, 7.0, 8.0);
    assert_eq!(a.union(&b), BoundingBox::new(0.0, 0.0, 7.0, 8.0));
    assert_eq!(b.union(&a), BoundingBox::new(0.0, 0.0, 7.0, 8.0));
}

#[test]
fn test_union_nested() {
    let outer = BoundingBox::new(0.0, 0.0, 100.0, 100.0);
    let inner = BoundingBox::new(25.0, 25.0, 75.0, 75.0);
    assert_eq!(outer.union(&inner), outer);
    assert_eq!(inner.union(&outer), outer);
}

#[test]
fn test_bbox_serde_roundtrip_keeps_crs_string() {
    let bbox = BoundingBox::new(1.0, 2.0, 3.0, 4.0);
    let json = serde_json::to_value(bbox).unwrap();
    assert_eq!(json["crs"], "CRS:84");
    let back: BoundingBox = serde_json::from_value(json).unwrap();
    assert_eq!(back, bbox);
}
