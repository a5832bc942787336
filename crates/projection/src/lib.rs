//! Coordinate reference system transformations.
//!
//! Implements the projections the query API accepts from scratch, without
//! an external PROJ dependency. Everything is transformed into and out of
//! the canonical CRS:84.

pub mod mercator;
pub mod transform;

pub use mercator::WebMercator;
pub use transform::{AxisPolicy, CrsTransformer};
