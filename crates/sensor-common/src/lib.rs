//! Common spatial types shared across the sensor query workspace.

pub mod bbox;
pub mod crs;
pub mod error;
pub mod wgs84;

pub use bbox::{BoundingBox, Point};
pub use crs::{AxisOrder, CrsCode};
pub use error::{SpatialError, SpatialResult};
