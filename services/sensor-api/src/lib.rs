//! Sensor API Service Library
//!
//! HTTP service that resolves sensor observation queries into filter specs
//! and evaluates them against a dataset catalog.

pub mod catalog;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod state;

use std::sync::Arc;

use axum::{
    routing::get,
    Extension, Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// Build the application router.
pub fn router(state: Arc<AppState>, prometheus: PrometheusHandle) -> Router {
    Router::new()
        // Filter resolution
        .route(
            "/api/v2/filter",
            get(handlers::filter::filter_handler).post(handlers::filter::filter_body_handler),
        )
        .route("/api/v1/filter", get(handlers::filter::legacy_filter_handler))
        // Collections
        .route(
            "/api/v2/:collection",
            get(handlers::collections::collection_handler),
        )
        .route(
            "/api/v1/:collection",
            get(handlers::collections::legacy_collection_handler),
        )
        // Health and metrics
        .route("/health", get(handlers::health::health_handler))
        .route("/ready", get(handlers::health::ready_handler))
        .route("/metrics", get(handlers::health::metrics_handler))
        // Middleware
        .layer(Extension(state))
        .layer(Extension(prometheus))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}
