//! Request bodies posted by clients.
//!
//! A body is either a simple dataset selection or a styled one carrying
//! per-dataset style options and output dimensions. Both share the same
//! parameter bag for everything else.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ParameterError;
use crate::parameters::{names, ParameterBag};
use crate::spec::QueryFilterSpec;

const STYLE_OPTIONS: &str = "styleoptions";
const WIDTH: &str = "width";
const HEIGHT: &str = "height";
const GRID: &str = "grid";
const LEGEND: &str = "legend";
const FORMAT: &str = "format";
const RAW_FORMAT: &str = "rawformat";

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 500;
pub const DEFAULT_GRID: bool = true;
pub const DEFAULT_LEGEND: bool = false;

/// Rendering hints for one dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_type: Option<String>,
    pub properties: BTreeMap<String, Value>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub reference_value_style_properties: BTreeMap<String, StyleProperties>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyledRequest {
    pub style_options: BTreeMap<String, StyleProperties>,
    pub width: u32,
    pub height: u32,
    pub grid: bool,
    pub legend: bool,
}

impl StyledRequest {
    pub fn style_options_of(&self, dataset_id: &str) -> Option<&StyleProperties> {
        self.style_options.get(dataset_id)
    }

    pub fn reference_style_options_of(
        &self,
        dataset_id: &str,
        reference_id: &str,
    ) -> Option<&StyleProperties> {
        self.style_options_of(dataset_id)?
            .reference_value_style_properties
            .get(reference_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RequestKind {
    Simple {
        #[serde(skip_serializing_if = "Option::is_none")]
        format: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        raw_format: Option<String>,
    },
    Styled(StyledRequest),
}

/// A parsed request body.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestParameterSet {
    pub kind: RequestKind,
    pub parameters: ParameterBag,
}

impl RequestParameterSet {
    /// Parse a JSON request body. Bodies with `styleOptions` are styled.
    pub fn from_json(body: &Value) -> Result<Self, ParameterError> {
        let object = body.as_object().ok_or_else(|| ParameterError::InvalidJson {
            param: "body".to_string(),
            message: "expected a JSON object".to_string(),
        })?;

        let style_options = object
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(STYLE_OPTIONS))
            .map(|(_, value)| value.clone());

        let rest: serde_json::Map<String, Value> = object
            .iter()
            .filter(|(key, _)| !key.eq_ignore_ascii_case(STYLE_OPTIONS))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        let parameters = ParameterBag::from_json_object(&rest);

        let kind = match style_options {
            Some(value) => {
                let style_options = serde_json::from_value(value).map_err(|e| {
                    ParameterError::InvalidJson {
                        param: "styleOptions".to_string(),
                        message: e.to_string(),
                    }
                })?;
                RequestKind::Styled(StyledRequest {
                    style_options,
                    width: dimension(&parameters, WIDTH, DEFAULT_WIDTH)?,
                    height: dimension(&parameters, HEIGHT, DEFAULT_HEIGHT)?,
                    grid: parameters.get_bool(GRID, DEFAULT_GRID)?,
                    legend: parameters.get_bool(LEGEND, DEFAULT_LEGEND)?,
                })
            }
            None => RequestKind::Simple {
                format: parameters.get_string(FORMAT),
                raw_format: parameters.get_string(RAW_FORMAT),
            },
        };

        Ok(Self { kind, parameters })
    }

    /// Requested dataset ids. Styled requests name their datasets by the
    /// keys of their style options.
    pub fn datasets(&self) -> Vec<String> {
        match &self.kind {
            RequestKind::Styled(styled) => styled.style_options.keys().cloned().collect(),
            RequestKind::Simple { .. } => self
                .parameters
                .get_values_of(names::DATASETS)
                .into_iter()
                .collect(),
        }
    }

    pub fn is_styled(&self) -> bool {
        matches!(self.kind, RequestKind::Styled(_))
    }

    /// Parameters with the dataset selection made explicit.
    pub fn effective_parameters(&self) -> ParameterBag {
        match &self.kind {
            RequestKind::Styled(_) => self.parameters.extend_with(names::DATASETS, self.datasets()),
            RequestKind::Simple { .. } => self.parameters.clone(),
        }
    }

    pub fn to_filter_spec(&self) -> Result<QueryFilterSpec, ParameterError> {
        QueryFilterSpec::from_parameters(&self.effective_parameters())
    }
}

fn dimension(parameters: &ParameterBag, name: &str, default: u32) -> Result<u32, ParameterError> {
    Ok(match parameters.get_int(name)? {
        Some(value) if value >= 0 => u32::try_from(value).unwrap_or(default),
        _ => default,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::EntityKind;
    use serde_json::json;

    #[test]
    fn test_simple_request() {
        let body = json!({"datasets": ["ts_1", "ts_2"], "format": "flot", "timespan": "PT6H/2024-01-01"});
        let request = RequestParameterSet::from_json(&body).unwrap();

        assert!(!request.is_styled());
        assert_eq!(request.datasets(), vec!["ts_1", "ts_2"]);
        assert!(matches!(
            request.kind,
            RequestKind::Simple { format: Some(ref f), .. } if f == "flot"
        ));
    }

    #[test]
    fn test_styled_request_defaults() {
        let body = json!({
            "styleOptions": {
                "ts_2": {"chartType": "bar", "properties": {"color": "#f00"}},
                "ts_1": {}
            }
        });
        let request = RequestParameterSet::from_json(&body).unwrap();

        let RequestKind::Styled(styled) = &request.kind else {
            panic!("expected a styled request");
        };
        assert_eq!(styled.width, DEFAULT_WIDTH);
        assert_eq!(styled.height, DEFAULT_HEIGHT);
        assert!(styled.grid);
        assert!(!styled.legend);
        assert_eq!(
            styled.style_options_of("ts_2").unwrap().chart_type.as_deref(),
            Some("bar")
        );
        assert_eq!(request.datasets(), vec!["ts_1", "ts_2"]);
        assert!(!request.parameters.contains("styleoptions"));
    }

    #[test]
    fn test_styled_request_negative_size_falls_back() {
        let body = json!({"styleOptions": {"a": {}}, "width": -1, "height": 300, "legend": true});
        let request = RequestParameterSet::from_json(&body).unwrap();
        let RequestKind::Styled(styled) = request.kind else {
            panic!("expected a styled request");
        };
        assert_eq!(styled.width, DEFAULT_WIDTH);
        assert_eq!(styled.height, 300);
        assert!(styled.legend);
    }

    #[test]
    fn test_reference_value_styles() {
        let body = json!({"styleOptions": {"a": {"referenceValueStyleProperties": {"ref_1": {"chartType": "line"}}}}});
        let request = RequestParameterSet::from_json(&body).unwrap();
        let RequestKind::Styled(styled) = &request.kind else {
            panic!("expected a styled request");
        };
        assert!(styled.reference_style_options_of("a", "ref_1").is_some());
        assert!(styled.reference_style_options_of("a", "ref_2").is_none());
        assert!(styled.reference_style_options_of("b", "ref_1").is_none());
    }

    #[test]
    fn test_styled_datasets_become_filter() {
        let body = json!({"styleOptions": {"7": {}, "9": {}}, "filter_platform_types": "mobile"});
        let spec = RequestParameterSet::from_json(&body).unwrap().to_filter_spec().unwrap();

        let datasets = spec.id_filters_of(EntityKind::Dataset).next().unwrap();
        assert_eq!(*datasets.id_set().surrogate_ids(), [7, 9].into_iter().collect());
        assert!(spec.platform_type_filter.include_mobile);
        assert!(!spec.platform_type_filter.include_stationary);
    }

    #[test]
    fn test_body_must_be_an_object() {
        let err = RequestParameterSet::from_json(&json!([1, 2])).unwrap_err();
        assert!(matches!(err, ParameterError::InvalidJson { .. }));
    }

    #[test]
    fn test_invalid_boolean_in_body() {
        let body = json!({"styleOptions": {}, "grid": "sometimes"});
        assert!(matches!(
            RequestParameterSet::from_json(&body).unwrap_err(),
            ParameterError::InvalidBoolean { .. }
        ));
    }
}
