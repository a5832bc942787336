//! Request parameter store.
//!
//! A [`ParameterBag`] holds the raw, multi-valued query (or JSON body)
//! parameters of one request. Keys are case-insensitive, values are kept as
//! JSON nodes in the order they were given. Bags are immutable; the derived
//! operations return new bags.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ParameterError;

/// Well-known parameter names (lower case).
pub mod names {
    pub const PLATFORMS: &str = "platforms";
    pub const CATEGORIES: &str = "categories";
    pub const SERVICES: &str = "services";
    pub const OFFERINGS: &str = "offerings";
    pub const FEATURES: &str = "features";
    pub const PROCEDURES: &str = "procedures";
    pub const PHENOMENA: &str = "phenomena";
    pub const STATIONS: &str = "stations";
    pub const DATASETS: &str = "datasets";
    pub const SERIES: &str = "series";
    pub const TIMESERIES: &str = "timeseries";

    // legacy single valued filters
    pub const CATEGORY: &str = "category";
    pub const SERVICE: &str = "service";
    pub const OFFERING: &str = "offering";
    pub const FEATURE: &str = "feature";
    pub const PROCEDURE: &str = "procedure";
    pub const PHENOMENON: &str = "phenomenon";
    pub const STATION: &str = "station";

    pub const FILTER_PLATFORM_TYPES: &str = "filter_platform_types";
    pub const FILTER_PLATFORM_GEOMETRIES: &str = "filter_platform_geometries";
    pub const FILTER_OBSERVED_GEOMETRIES: &str = "filter_observed_geometries";
    pub const FILTER_DATASET_TYPES: &str = "filter_dataset_types";

    // camel case spellings of the axis filters used by older clients
    pub const PLATFORM_TYPES: &str = "platformtypes";
    pub const PLATFORM_GEOMETRIES: &str = "platformgeometries";
    pub const OBSERVED_GEOMETRIES: &str = "observedgeometries";
    pub const VALUE_TYPES: &str = "valuetypes";
    pub const DATASET_TYPES: &str = "datasettypes";

    pub const NEAR: &str = "near";
    pub const BBOX: &str = "bbox";
    pub const CRS: &str = "crs";
    pub const FORCE_XY: &str = "forcexy";
    pub const MATCH_DOMAIN_IDS: &str = "matchdomainids";
    pub const RESULT_TIME: &str = "resulttime";
    pub const RESULT_TIMES: &str = "resulttimes";
    pub const TIMESPAN: &str = "timespan";
    pub const OFFSET: &str = "offset";
    pub const LIMIT: &str = "limit";
    pub const EXPANDED: &str = "expanded";
    pub const LOCALE: &str = "locale";
    pub const SEARCH_TERM: &str = "q";
}

/// Documented defaults for optional parameters.
pub mod defaults {
    pub const LOCALE: &str = "en";
    pub const CRS: &str = "CRS:84";
    pub const FORCE_XY: bool = false;
    pub const MATCH_DOMAIN_IDS: bool = false;
    pub const EXPANDED: bool = false;
}

/// Token selecting every value of an axis.
pub const ALL_TOKEN: &str = "all";

/// Deployment wide default parameters, applied underneath every request.
///
/// Loaded from configuration and passed explicitly into
/// [`ParameterBag::with_defaults`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterDefaults(BTreeMap<String, Value>);

impl ParameterDefaults {
    pub fn new(values: BTreeMap<String, Value>) -> Self {
        Self(values)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Immutable, case-insensitive, multi-valued parameter store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterBag {
    values: BTreeMap<String, Vec<Value>>,
}

impl ParameterBag {
    /// An empty bag.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a bag from query string pairs. Repeated keys append values.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut values: BTreeMap<String, Vec<Value>> = BTreeMap::new();
        for (key, value) in pairs {
            values
                .entry(key.as_ref().to_lowercase())
                .or_default()
                .push(Value::String(value.into()));
        }
        Self { values }
    }

    /// Build a bag from a JSON object (e.g. a POST body). Array values
    /// become multiple value nodes, `null` values are dropped.
    pub fn from_json_object(object: &serde_json::Map<String, Value>) -> Self {
        let mut values: BTreeMap<String, Vec<Value>> = BTreeMap::new();
        for (key, value) in object {
            let nodes = values.entry(key.to_lowercase()).or_default();
            match value {
                Value::Null => {}
                Value::Array(items) => nodes.extend(items.iter().cloned()),
                other => nodes.push(other.clone()),
            }
        }
        Self { values }
    }

    /// Layer this bag on top of configured defaults. A request key replaces
    /// every default value of that key.
    pub fn with_defaults(defaults: &ParameterDefaults, request: ParameterBag) -> Self {
        let mut values = Self::from_json_object(&defaults.0.clone().into_iter().collect()).values;
        for (key, nodes) in request.values {
            if !nodes.is_empty() {
                values.insert(key, nodes);
            }
        }
        Self { values }
    }

    /// True if the parameter is present with at least one value.
    pub fn contains(&self, name: &str) -> bool {
        self.nodes(name).is_some()
    }

    /// Parameter names present in this bag.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values
            .iter()
            .filter(|(_, nodes)| !nodes.is_empty())
            .map(|(key, _)| key.as_str())
    }

    /// Raw value nodes of a parameter.
    pub fn nodes(&self, name: &str) -> Option<&[Value]> {
        self.values
            .get(&name.to_lowercase())
            .map(Vec::as_slice)
            .filter(|nodes| !nodes.is_empty())
    }

    /// All values rendered as text and joined by commas.
    pub fn get_string(&self, name: &str) -> Option<String> {
        self.nodes(name).map(|nodes| {
            nodes
                .iter()
                .map(node_as_text)
                .collect::<Vec<_>>()
                .join(",")
        })
    }

    pub fn get_string_or(&self, name: &str, default: &str) -> String {
        self.get_string(name)
            .unwrap_or_else(|| default.to_string())
    }

    /// Comma separated values as a lower-cased set. Empty tokens are dropped.
    pub fn get_values_of(&self, name: &str) -> BTreeSet<String> {
        self.get_string(name)
            .map(|csv| csv_to_lower_cased_set(&csv))
            .unwrap_or_default()
    }

    /// Union of the values of several parameters.
    pub fn get_values_of_any(&self, names: &[&str]) -> BTreeSet<String> {
        names
            .iter()
            .flat_map(|name| self.get_values_of(name))
            .collect()
    }

    /// Integer parameter; `None` when absent.
    pub fn get_int(&self, name: &str) -> Result<Option<i64>, ParameterError> {
        let Some(raw) = self.get_string(name) else {
            return Ok(None);
        };
        raw.trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| ParameterError::InvalidInteger {
                param: name.to_string(),
                value: raw,
            })
    }

    /// Non-negative integer parameter; `None` when absent.
    pub fn get_non_negative(&self, name: &str) -> Result<Option<u64>, ParameterError> {
        match self.get_int(name)? {
            None => Ok(None),
            Some(value) if value < 0 => Err(ParameterError::NegativeValue {
                param: name.to_string(),
                value,
            }),
            Some(value) => Ok(Some(value as u64)),
        }
    }

    /// Boolean parameter, `true`/`false` in any case.
    pub fn get_bool(&self, name: &str, default: bool) -> Result<bool, ParameterError> {
        let Some(raw) = self.get_string(name) else {
            return Ok(default);
        };
        match raw.trim().to_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(ParameterError::InvalidBoolean {
                param: name.to_string(),
                value: raw,
            }),
        }
    }

    pub fn locale(&self) -> String {
        self.get_string_or(names::LOCALE, defaults::LOCALE)
    }

    pub fn crs(&self) -> String {
        self.get_string_or(names::CRS, defaults::CRS)
    }

    pub fn is_force_xy(&self) -> Result<bool, ParameterError> {
        self.get_bool(names::FORCE_XY, defaults::FORCE_XY)
    }

    pub fn is_match_domain_ids(&self) -> Result<bool, ParameterError> {
        self.get_bool(names::MATCH_DOMAIN_IDS, defaults::MATCH_DOMAIN_IDS)
    }

    pub fn is_expanded(&self) -> Result<bool, ParameterError> {
        self.get_bool(names::EXPANDED, defaults::EXPANDED)
    }

    /// New bag where `key` holds exactly `values`.
    pub fn extend_with<I, V>(&self, key: &str, values: I) -> ParameterBag
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let mut copy = self.values.clone();
        copy.insert(
            key.to_lowercase(),
            values.into_iter().map(|v| Value::String(v.into())).collect(),
        );
        Self { values: copy }
    }

    /// New bag where the nodes of `key` are followed by `values`.
    pub fn append_to(&self, key: &str, values: &[Value]) -> ParameterBag {
        let mut copy = self.values.clone();
        copy.entry(key.to_lowercase())
            .or_default()
            .extend(values.iter().cloned());
        Self { values: copy }
    }

    /// New bag without `key`.
    pub fn remove_all_of(&self, key: &str) -> ParameterBag {
        let mut copy = self.values.clone();
        copy.remove(&key.to_lowercase());
        Self { values: copy }
    }
}

fn node_as_text(node: &Value) -> String {
    match node {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn csv_to_lower_cased_set(csv: &str) -> BTreeSet<String> {
    csv.split(',')
        .map(|token| token.trim().to_lowercase())
        .filter(|token| !token.is_empty())
        .collect()
}
