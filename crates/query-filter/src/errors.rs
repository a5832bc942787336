//! Parameter error types.

use sensor_common::SpatialError;
use thiserror::Error;

use crate::responses::ExceptionResponse;

/// Errors raised while reading request parameters into a filter.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ParameterError {
    #[error("Parameter '{param}' is not an integer: {value}")]
    InvalidInteger { param: String, value: String },

    #[error("Parameter '{param}' must not be negative: {value}")]
    NegativeValue { param: String, value: i64 },

    #[error("Parameter '{param}' is not a boolean: {value}")]
    InvalidBoolean { param: String, value: String },

    #[error("Parameter '{param}' is not valid JSON: {message}")]
    InvalidJson { param: String, message: String },

    #[error("Parameter '{param}' is malformed: {message}")]
    Malformed { param: String, message: String },

    #[error("Parameter 'near' has an invalid radius: {0}")]
    InvalidRadius(String),

    #[error("Parameter '{param}' is not an ISO 8601 timestamp: {value}")]
    InvalidTimestamp { param: String, value: String },

    #[error("Parameter '{param}' is not an ISO 8601 interval: {value}")]
    InvalidInterval { param: String, value: String },

    #[error("Spatial error: {0}")]
    Spatial(#[from] SpatialError),
}

impl ParameterError {
    /// HTTP status code for this error. Every parameter error is a client
    /// error.
    pub fn status_code(&self) -> u16 {
        400
    }

    /// Name of the offending parameter, when known.
    pub fn parameter(&self) -> Option<&str> {
        match self {
            ParameterError::InvalidInteger { param, .. }
            | ParameterError::NegativeValue { param, .. }
            | ParameterError::InvalidBoolean { param, .. }
            | ParameterError::InvalidJson { param, .. }
            | ParameterError::Malformed { param, .. }
            | ParameterError::InvalidTimestamp { param, .. }
            | ParameterError::InvalidInterval { param, .. } => Some(param),
            ParameterError::InvalidRadius(_) => Some("near"),
            ParameterError::Spatial(_) => None,
        }
    }

    /// Convert to an ExceptionResponse.
    pub fn to_exception(&self) -> ExceptionResponse {
        let exception = ExceptionResponse::bad_request(self.to_string());
        match self {
            ParameterError::Spatial(e) => exception.with_title(e.code()),
            other => match other.parameter() {
                Some(param) => exception.with_parameter(param),
                None => exception,
            },
        }
    }
}
