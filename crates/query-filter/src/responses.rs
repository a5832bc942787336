//! Error response body shared by the API surfaces.

use serde::{Deserialize, Serialize};

/// Exception type identifiers.
pub mod exception_types {
    pub const INVALID_PARAMETER_VALUE: &str = "invalid-parameter-value";
    pub const NOT_FOUND: &str = "not-found";
    pub const SERVER_ERROR: &str = "server-error";
}

/// Problem-details style exception body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExceptionResponse {
    /// Exception type identifier.
    #[serde(rename = "type")]
    pub type_: String,

    /// Human-readable title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// HTTP status code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,

    /// Detailed error message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Name of the offending request parameter, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,

    /// URI of the request that caused the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl ExceptionResponse {
    pub fn new(type_: impl Into<String>, status: u16, detail: impl Into<String>) -> Self {
        Self {
            type_: type_.into(),
            title: None,
            status: Some(status),
            detail: Some(detail.into()),
            parameter: None,
            instance: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_parameter(mut self, parameter: impl Into<String>) -> Self {
        self.parameter = Some(parameter.into());
        self
    }

    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }

    /// 404 Not Found.
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(exception_types::NOT_FOUND, 404, detail).with_title("Not Found")
    }

    /// 400 Bad Request for a malformed or invalid parameter value.
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(exception_types::INVALID_PARAMETER_VALUE, 400, detail).with_title("Bad Request")
    }

    /// 500 Internal Server Error.
    pub fn internal_error(detail: impl Into<String>) -> Self {
        Self::new(exception_types::SERVER_ERROR, 500, detail).with_title("Internal Server Error")
    }
}
