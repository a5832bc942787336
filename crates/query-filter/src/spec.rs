//! The resolved filter specification handed to the storage layer.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use projection::CrsTransformer;
use sensor_common::{BoundingBox, CrsCode, SpatialResult};

use crate::compat;
use crate::errors::ParameterError;
use crate::filter::{
    DatasetTypeFilter, FilterResolver, GeometryAxisState, GeometryFilter, PlatformTypeFilter,
    PlatformTypeState, INSITU, MEASUREMENT, STATIONARY,
};
use crate::ids::{EntityKind, IdFilter};
use crate::parameters::{names, ParameterBag};
use crate::platform::PlatformType;
use crate::spatial::SpatialFilterResolver;
use crate::time::{parse_timestamp, ResultTimes, TimeInterval};

/// Id list parameters and the entity kind they filter.
const ID_PARAMETERS: &[(&str, EntityKind)] = &[
    (names::PHENOMENA, EntityKind::Phenomenon),
    (names::PROCEDURES, EntityKind::Procedure),
    (names::OFFERINGS, EntityKind::Offering),
    (names::FEATURES, EntityKind::Feature),
    (names::CATEGORIES, EntityKind::Category),
    (names::SERVICES, EntityKind::Service),
    (names::DATASETS, EntityKind::Dataset),
];

/// Offset and limit of a paged request. `None` means unset, which differs
/// from an explicit zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

impl Pagination {
    pub fn from_parameters(parameters: &ParameterBag) -> Result<Self, ParameterError> {
        Ok(Self {
            offset: parameters.get_non_negative(names::OFFSET)?,
            limit: parameters.get_non_negative(names::LIMIT)?,
        })
    }

    /// Apply to an already sorted sequence.
    pub fn apply<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        let offset = self.offset.map_or(0, |o| usize::try_from(o).unwrap_or(usize::MAX));
        let limit = self.limit.map_or(usize::MAX, |l| usize::try_from(l).unwrap_or(usize::MAX));
        items.into_iter().skip(offset).take(limit).collect()
    }
}

/// Everything a storage adapter needs to select entities for one request.
///
/// Built in a single pass from a [`ParameterBag`] and never changed
/// afterwards. Construction fails fast on the first malformed parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryFilterSpec {
    pub platform_types: PlatformTypeState,
    pub platform_type_filter: PlatformTypeFilter,
    pub geometries: GeometryAxisState,
    pub geometry_filter: GeometryFilter,
    pub id_filters: Vec<IdFilter>,
    pub spatial_filter: Option<BoundingBox>,
    pub dataset_types: DatasetTypeFilter,
    pub result_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_times: Option<ResultTimes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timespan: Option<TimeInterval>,
    pub pagination: Pagination,
    pub locale: String,
    pub expanded: bool,
    pub match_domain_ids: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_term: Option<String>,
    pub backwards_compatible: bool,
    pub pure_stationary_insitu: bool,
}

impl QueryFilterSpec {
    /// Build the spec for a current API request. Legacy parameter names are
    /// folded first.
    pub fn from_parameters(parameters: &ParameterBag) -> Result<Self, ParameterError> {
        let parameters = compat::fold_legacy_parameters(parameters);
        Self::build(&parameters)
    }

    /// Build the spec for a legacy API request, which additionally implies
    /// stationary in-situ measurements when no axis filter was given.
    pub fn from_legacy_parameters(parameters: &ParameterBag) -> Result<Self, ParameterError> {
        let parameters = compat::fold_legacy_parameters(parameters);
        let parameters = compat::ensure_backwards_compatibility(&parameters);
        Self::build(&parameters)
    }

    fn build(parameters: &ParameterBag) -> Result<Self, ParameterError> {
        let resolver = FilterResolver::from_parameters(parameters);
        let match_domain_ids = parameters.is_match_domain_ids()?;

        let spatial_filter = SpatialFilterResolver::from_parameters(parameters)?.resolve(parameters)?;
        let result_time = parameters
            .get_string(names::RESULT_TIME)
            .map(|raw| parse_timestamp(names::RESULT_TIME, &raw))
            .transpose()?;
        let result_times = ResultTimes::from_values(names::RESULT_TIMES, &csv_values(parameters, names::RESULT_TIMES))?;
        let timespan = parameters
            .get_string(names::TIMESPAN)
            .map(|raw| TimeInterval::parse_at(names::TIMESPAN, &raw, Utc::now()))
            .transpose()?;
        let pagination = Pagination::from_parameters(parameters)?;
        let expanded = parameters.is_expanded()?;

        let platform_type_values = parameters.get_values_of(names::FILTER_PLATFORM_TYPES);
        let pure_stationary_insitu = is_stationary_insitu_only(&platform_type_values)
            && is_measurement_only(resolver.dataset_types().types());

        let spec = Self {
            platform_types: resolver.platform_types(),
            platform_type_filter: resolver.platform_type_filter(),
            geometries: resolver.geometries(),
            geometry_filter: resolver.geometry_filter(),
            id_filters: id_filters(parameters, match_domain_ids),
            spatial_filter,
            dataset_types: resolver.dataset_types().clone(),
            result_time,
            result_times,
            timespan,
            pagination,
            locale: parameters.locale(),
            expanded,
            match_domain_ids,
            search_term: parameters.get_string(names::SEARCH_TERM),
            backwards_compatible: resolver.shall_behave_backwards_compatible(),
            pure_stationary_insitu,
        };
        debug!(
            id_filters = spec.id_filters.len(),
            spatial = spec.spatial_filter.is_some(),
            backwards_compatible = spec.backwards_compatible,
            "Built query filter spec"
        );
        Ok(spec)
    }

    /// Resolver view of the axis states this spec was built from.
    pub fn filter_resolver(&self) -> FilterResolver {
        FilterResolver::new(self.platform_types, self.geometries, self.dataset_types.clone())
    }

    /// Platform types are exactly stationary and insitu, dataset types
    /// exactly measurement.
    pub fn is_pure_stationary_insitu_query(&self) -> bool {
        self.pure_stationary_insitu
    }

    pub fn shall_include_all_platform_types(&self) -> bool {
        self.platform_types.shall_include_all()
    }

    /// Whether dataset types restrict the result.
    pub fn is_dataset_type_filter_applied(&self) -> bool {
        self.dataset_types.is_set()
            && (self.backwards_compatible || !self.dataset_types.shall_include_all())
    }

    /// Whether a dataset of `dataset_type` passes the dataset type filter.
    pub fn admits_dataset_type(&self, dataset_type: &str) -> bool {
        !self.is_dataset_type_filter_applied() || self.dataset_types.shall_include(dataset_type)
    }

    /// Id filters of one entity kind.
    pub fn id_filters_of(&self, kind: EntityKind) -> impl Iterator<Item = &IdFilter> {
        self.id_filters.iter().filter(move |f| f.kind() == kind)
    }

    /// The spatial filter transformed into a storage CRS. Storage CRSs use
    /// longitude/easting first.
    pub fn spatial_filter_in(&self, crs: CrsCode) -> SpatialResult<Option<BoundingBox>> {
        self.spatial_filter
            .map(|bbox| CrsTransformer::force_xy().bbox_from_canonical(&bbox, crs))
            .transpose()
    }
}

fn id_filters(parameters: &ParameterBag, match_domain_ids: bool) -> Vec<IdFilter> {
    let mut filters: Vec<IdFilter> = ID_PARAMETERS
        .iter()
        .filter_map(|(name, kind)| {
            let ids = parameters.get_values_of(name);
            (!ids.is_empty()).then(|| IdFilter::for_kind(*kind, ids, match_domain_ids))
        })
        .collect();

    let platforms = parameters.get_values_of(names::PLATFORMS);
    if !platforms.is_empty() {
        let (stationary, other): (BTreeSet<String>, BTreeSet<String>) = platforms
            .into_iter()
            .partition(|id| PlatformType::is_stationary_id(id));
        let strip = |ids: BTreeSet<String>| -> BTreeSet<String> {
            ids.iter()
                .map(|id| PlatformType::extract_id(id).to_string())
                .collect()
        };
        if !stationary.is_empty() {
            filters.push(IdFilter::for_kind(EntityKind::Feature, strip(stationary), match_domain_ids));
        }
        if !other.is_empty() {
            filters.push(IdFilter::for_kind(EntityKind::Platform, strip(other), match_domain_ids));
        }
    }
    filters
}

/// Comma separated values with their case kept.
fn csv_values(parameters: &ParameterBag, name: &str) -> BTreeSet<String> {
    parameters
        .get_string(name)
        .map(|csv| {
            csv.split(',')
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn is_stationary_insitu_only(platform_types: &BTreeSet<String>) -> bool {
    platform_types.len() == 2
        && platform_types.contains(STATIONARY)
        && platform_types.contains(INSITU)
}

fn is_measurement_only(dataset_types: &BTreeSet<String>) -> bool {
    dataset_types.len() == 1 && dataset_types.contains(MEASUREMENT)
}
