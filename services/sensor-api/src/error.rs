//! Handler errors and their HTTP representation.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use metrics::counter;
use query_filter::{ExceptionResponse, ParameterError};
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::metrics::PARAMETER_ERRORS_TOTAL;

/// Errors a handler can answer with.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error("Unknown collection: {0}")]
    UnknownCollection(String),

    #[error("Store failure: {0}")]
    Store(String),
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Parameter(e) => ApiError::Parameter(e),
            CatalogError::Unavailable(message) => ApiError::Store(message),
        }
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Parameter(e) => {
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::BAD_REQUEST)
            }
            ApiError::UnknownCollection(_) => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_exception(&self) -> ExceptionResponse {
        match self {
            ApiError::Parameter(e) => e.to_exception(),
            ApiError::UnknownCollection(name) => {
                ExceptionResponse::not_found(format!("Collection '{}' not found", name))
            }
            // Store details stay in the log.
            ApiError::Store(_) => ExceptionResponse::internal_error("Catalog query failed"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Parameter(e) => {
                counter!(PARAMETER_ERRORS_TOTAL).increment(1);
                tracing::warn!(parameter = e.parameter(), "Rejected request: {}", e);
            }
            ApiError::UnknownCollection(name) => {
                tracing::debug!("Unknown collection requested: {}", name);
            }
            ApiError::Store(message) => {
                tracing::error!("Catalog query failed: {}", message);
            }
        }
        (self.status_code(), Json(self.to_exception())).into_response()
    }
}
