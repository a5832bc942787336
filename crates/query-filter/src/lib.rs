//! Query filter resolution for the sensor observation API.
//!
//! Clients describe what they want with flat, multi-valued request
//! parameters. This crate turns them into one [`QueryFilterSpec`]:
//!
//! - legacy parameters are folded into their current names ([`compat`])
//! - platform type and geometry axes are resolved ([`filter`])
//! - `bbox` and `near` are merged into one canonical box ([`spatial`])
//! - id lists become per-entity filters ([`ids`])
//! - `timespan` and result times are validated ([`time`])
//!
//! # Example
//!
//! ```rust
//! use query_filter::{ParameterBag, QueryFilterSpec};
//!
//! let parameters = ParameterBag::from_pairs([
//!     ("filter_platform_types", "mobile"),
//!     ("bbox", "7,51,8,52"),
//! ]);
//! let spec = QueryFilterSpec::from_parameters(&parameters).unwrap();
//!
//! assert!(spec.platform_type_filter.include_mobile);
//! assert!(!spec.platform_type_filter.include_stationary);
//! assert!(spec.spatial_filter.is_some());
//! ```

pub mod compat;
pub mod errors;
pub mod filter;
pub mod ids;
pub mod parameters;
pub mod platform;
pub mod request;
pub mod responses;
pub mod spatial;
pub mod spec;
pub mod time;

pub use errors::ParameterError;
pub use filter::{
    DatasetTypeFilter, FilterResolver, GeometryAxisState, GeometryFilter, PlatformTypeFilter,
    PlatformTypeState,
};
pub use ids::{
    parse_to_ids, EntityKind, HierarchicalIdSetFilter, IdFilter, IdSetFilter, Identified,
    IMPOSSIBLE_ID,
};
pub use parameters::{ParameterBag, ParameterDefaults};
pub use platform::PlatformType;
pub use request::{RequestKind, RequestParameterSet, StyleProperties, StyledRequest};
pub use responses::ExceptionResponse;
pub use spatial::{SpatialFilterResolver, Vicinity};
pub use spec::{Pagination, QueryFilterSpec};
pub use time::{ResultTimes, TimeInterval};
