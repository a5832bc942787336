//! Dataset catalog and filter evaluation.
//!
//! The catalog holds one [`DatasetRecord`] per time series, denormalized
//! with every entity the series belongs to. A [`QueryFilterSpec`] is
//! evaluated per record; collections are projections of the matching
//! records.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use query_filter::{
    EntityKind, IdFilter, Identified, ParameterError, PlatformType, QueryFilterSpec,
};
use sensor_common::{BoundingBox, CrsCode, Point};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::config::CatalogConfig;

/// Errors raised by an [`ObservationStore`].
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The request cannot be evaluated against the store.
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    /// The backing store failed.
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

/// A reference to a catalog entity with its optional parent chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: i64,
    pub domain_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parents: Vec<EntityRef>,
}

impl Identified for EntityRef {
    fn surrogate_id(&self) -> i64 {
        self.id
    }

    fn domain_id(&self) -> &str {
        &self.domain_id
    }
}

/// The feature of interest a series observes, with its stored location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRef {
    pub id: i64,
    pub domain_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Location in the catalog storage CRS, easting/longitude first.
    pub location: Point,
}

impl Identified for FeatureRef {
    fn surrogate_id(&self) -> i64 {
        self.id
    }

    fn domain_id(&self) -> &str {
        &self.domain_id
    }
}

/// The platform carrying the sensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformRef {
    pub id: i64,
    pub domain_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub mobile: bool,
    #[serde(default = "default_insitu")]
    pub insitu: bool,
}

fn default_insitu() -> bool {
    true
}

impl Identified for PlatformRef {
    fn surrogate_id(&self) -> i64 {
        self.id
    }

    fn domain_id(&self) -> &str {
        &self.domain_id
    }
}

impl PlatformRef {
    pub fn platform_type(&self) -> PlatformType {
        PlatformType::from_flags(self.mobile, self.insitu)
    }
}

/// One time series of the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetRecord {
    pub id: i64,
    pub domain_id: String,
    #[serde(default = "default_dataset_type")]
    pub dataset_type: String,
    /// Observations of this series move with the platform.
    #[serde(default)]
    pub dynamic: bool,
    pub phenomenon: EntityRef,
    pub procedure: EntityRef,
    pub offering: EntityRef,
    pub feature: FeatureRef,
    pub category: EntityRef,
    pub service: EntityRef,
    pub platform: PlatformRef,
}

fn default_dataset_type() -> String {
    "measurement".to_string()
}

impl Identified for DatasetRecord {
    fn surrogate_id(&self) -> i64 {
        self.id
    }

    fn domain_id(&self) -> &str {
        &self.domain_id
    }
}

impl DatasetRecord {
    /// The entity of `kind` this series belongs to.
    pub fn entity(&self, kind: EntityKind) -> &dyn Identified {
        match kind {
            EntityKind::Phenomenon => &self.phenomenon,
            EntityKind::Procedure => &self.procedure,
            EntityKind::Offering => &self.offering,
            EntityKind::Feature => &self.feature,
            EntityKind::Category => &self.category,
            EntityKind::Platform => &self.platform,
            EntityKind::Service => &self.service,
            EntityKind::Dataset => self,
        }
    }

    /// Parent chain of the entity of `kind`, empty for flat kinds.
    pub fn parents(&self, kind: EntityKind) -> &[EntityRef] {
        match kind {
            EntityKind::Procedure => &self.procedure.parents,
            EntityKind::Offering => &self.offering.parents,
            _ => &[],
        }
    }

    /// Platform id as exposed by the API. Stationary platforms are
    /// identified by their site, mobile platforms by the platform itself.
    pub fn platform_api_id(&self) -> String {
        let platform_type = self.platform.platform_type();
        if platform_type.is_stationary() {
            platform_type.create_id(self.feature.id)
        } else {
            platform_type.create_id(self.platform.id)
        }
    }

    /// Whether this series passes every filter of `spec`. `bbox` is the
    /// spatial filter already transformed into the storage CRS.
    pub fn matches(&self, spec: &QueryFilterSpec, bbox: Option<&BoundingBox>) -> bool {
        spec.platform_type_filter
            .admits(self.platform.mobile, self.platform.insitu)
            && self.matches_geometries(spec)
            && spec.admits_dataset_type(&self.dataset_type)
            && spec.id_filters.iter().all(|filter| self.matches_id_filter(filter))
            && bbox.map_or(true, |bbox| bbox.contains(&self.feature.location))
    }

    /// Geometry axes restrict datasets only when the request names them.
    fn matches_geometries(&self, spec: &QueryFilterSpec) -> bool {
        let filter = &spec.geometry_filter;
        (!spec.geometries.platform_geometries_set || filter.admits_platform(self.platform.mobile))
            && (!spec.geometries.observed_geometries_set || filter.admits_observation(self.dynamic))
    }

    fn matches_id_filter(&self, filter: &IdFilter) -> bool {
        let kind = filter.kind();
        match filter {
            IdFilter::Flat(f) => f.matches(self.entity(kind)),
            IdFilter::Hierarchical(h) => h.matches(self.entity(kind), self.parents(kind)),
        }
    }
}

/// Storage backend of the service.
#[async_trait]
pub trait ObservationStore: Send + Sync {
    /// CRS the stored locations are kept in.
    fn storage_crs(&self) -> CrsCode;

    /// All series matching `spec`, ordered by id.
    async fn find_datasets(&self, spec: &QueryFilterSpec) -> Result<Vec<DatasetRecord>, CatalogError>;

    /// Whether the store can answer queries.
    async fn is_ready(&self) -> Result<(), CatalogError>;
}

/// Catalog kept in memory, loaded from `catalog.yaml`.
#[derive(Debug, Clone)]
pub struct InMemoryCatalog {
    storage_crs: CrsCode,
    datasets: Vec<DatasetRecord>,
}

impl InMemoryCatalog {
    pub fn new(storage_crs: CrsCode, mut datasets: Vec<DatasetRecord>) -> Self {
        datasets.sort_by_key(|d| d.id);
        Self {
            storage_crs,
            datasets,
        }
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(config.storage_crs, config.datasets.clone())
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

#[async_trait]
impl ObservationStore for InMemoryCatalog {
    fn storage_crs(&self) -> CrsCode {
        self.storage_crs
    }

    async fn find_datasets(&self, spec: &QueryFilterSpec) -> Result<Vec<DatasetRecord>, CatalogError> {
        let bbox = spec
            .spatial_filter_in(self.storage_crs)
            .map_err(ParameterError::from)?;

        let matching: Vec<DatasetRecord> = self
            .datasets
            .iter()
            .filter(|d| d.matches(spec, bbox.as_ref()))
            .cloned()
            .collect();

        tracing::debug!(
            total = self.datasets.len(),
            matching = matching.len(),
            "Evaluated filter spec against catalog"
        );
        Ok(matching)
    }

    async fn is_ready(&self) -> Result<(), CatalogError> {
        Ok(())
    }
}

/// Collections exposed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Datasets,
    Platforms,
    Features,
    Procedures,
    Offerings,
    Phenomena,
    Categories,
    Services,
}

impl Collection {
    pub const ALL: [Collection; 8] = [
        Collection::Datasets,
        Collection::Platforms,
        Collection::Features,
        Collection::Procedures,
        Collection::Offerings,
        Collection::Phenomena,
        Collection::Categories,
        Collection::Services,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Datasets => "datasets",
            Collection::Platforms => "platforms",
            Collection::Features => "features",
            Collection::Procedures => "procedures",
            Collection::Offerings => "offerings",
            Collection::Phenomena => "phenomena",
            Collection::Categories => "categories",
            Collection::Services => "services",
        }
    }

    /// Distinct entities of this collection among `datasets`, ordered by id.
    pub fn project(&self, datasets: &[DatasetRecord], expanded: bool) -> Vec<EntitySummary> {
        let mut entities: BTreeMap<String, EntitySummary> = BTreeMap::new();
        for dataset in datasets {
            let summary = self.summarize(dataset, expanded);
            entities.entry(summary.id.clone()).or_insert(summary);
        }
        let mut summaries: Vec<EntitySummary> = entities.into_values().collect();
        summaries.sort_by(|a, b| sort_key(&a.id).cmp(&sort_key(&b.id)));
        summaries
    }

    fn summarize(&self, dataset: &DatasetRecord, expanded: bool) -> EntitySummary {
        match self {
            Collection::Datasets => EntitySummary {
                id: dataset.id.to_string(),
                domain_id: dataset.domain_id.clone(),
                label: None,
                details: expanded.then(|| {
                    json!({
                        "datasetType": dataset.dataset_type,
                        "platformType": dataset.platform.platform_type(),
                        "phenomenon": dataset.phenomenon.id.to_string(),
                        "feature": dataset.feature.id.to_string(),
                        "platform": dataset.platform_api_id(),
                    })
                }),
            },
            Collection::Platforms => EntitySummary {
                id: dataset.platform_api_id(),
                domain_id: dataset.platform.domain_id.clone(),
                label: dataset.platform.label.clone(),
                details: expanded.then(|| {
                    json!({
                        "platformType": dataset.platform.platform_type(),
                        "mobile": dataset.platform.mobile,
                        "insitu": dataset.platform.insitu,
                    })
                }),
            },
            Collection::Features => EntitySummary {
                id: dataset.feature.id.to_string(),
                domain_id: dataset.feature.domain_id.clone(),
                label: dataset.feature.label.clone(),
                details: expanded.then(|| {
                    json!({
                        "geometry": {
                            "type": "Point",
                            "coordinates": [dataset.feature.location.x, dataset.feature.location.y],
                        }
                    })
                }),
            },
            Collection::Procedures => EntitySummary::of(&dataset.procedure, expanded),
            Collection::Offerings => EntitySummary::of(&dataset.offering, expanded),
            Collection::Phenomena => EntitySummary::of(&dataset.phenomenon, expanded),
            Collection::Categories => EntitySummary::of(&dataset.category, expanded),
            Collection::Services => EntitySummary::of(&dataset.service, expanded),
        }
    }
}

/// Numeric ids sort numerically, prefixed platform ids after them.
fn sort_key(id: &str) -> (i64, &str) {
    (id.parse().unwrap_or(i64::MAX), id)
}

impl FromStr for Collection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Collection::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| s.to_string())
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a collection response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitySummary {
    pub id: String,
    pub domain_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl EntitySummary {
    fn of(entity: &EntityRef, expanded: bool) -> Self {
        Self {
            id: entity.id.to_string(),
            domain_id: entity.domain_id.clone(),
            label: entity.label.clone(),
            details: (expanded && !entity.parents.is_empty()).then(|| {
                json!({
                    "parents": entity.parents.iter().map(|p| p.id.to_string()).collect::<Vec<_>>(),
                })
            }),
        }
    }

    /// Case-insensitive match of `term` against label and domain id.
    pub fn matches_search_term(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.domain_id.to_lowercase().contains(&term)
            || self
                .label
                .as_ref()
                .is_some_and(|label| label.to_lowercase().contains(&term))
    }
}
