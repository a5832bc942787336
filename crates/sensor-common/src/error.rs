//! Error types for spatial parsing and coordinate handling.

use thiserror::Error;

/// Result type alias using SpatialError.
pub type SpatialResult<T> = Result<T, SpatialError>;

/// Errors raised while parsing or transforming spatial input.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SpatialError {
    #[error("Unsupported CRS: {0}")]
    UnsupportedCrs(String),

    #[error("Invalid BBOX format: {0}. Expected 'minx,miny,maxx,maxy'")]
    InvalidBbox(String),

    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    #[error("Coordinate ({x}, {y}) is outside the domain of {crs}")]
    OutOfDomain { crs: String, x: f64, y: f64 },

    #[error("Could not transform to {target}: {message}")]
    TransformFailed { target: String, message: String },
}

impl SpatialError {
    /// Short machine readable code for exception bodies.
    pub fn code(&self) -> &'static str {
        match self {
            SpatialError::UnsupportedCrs(_) => "InvalidCRS",
            SpatialError::InvalidBbox(_) | SpatialError::InvalidNumber(_) => "InvalidBBox",
            SpatialError::OutOfDomain { .. } | SpatialError::TransformFailed { .. } => {
                "TransformFailed"
            }
        }
    }
}
