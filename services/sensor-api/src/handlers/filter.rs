//! Filter resolution endpoints.
//!
//! These return the resolved filter of a request without touching the
//! catalog, which makes them useful to debug client parameters.

use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    Json,
};
use query_filter::{EntityKind, ParameterBag, QueryFilterSpec, RequestKind, RequestParameterSet};
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::metrics::RequestTimer;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterResponse {
    /// `simple` or `styled`, only for request bodies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_kind: Option<&'static str>,
    pub datasets: Vec<String>,
    pub filter: QueryFilterSpec,
}

/// GET /api/v2/filter
pub async fn filter_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<FilterResponse>, ApiError> {
    let _timer = RequestTimer::start("filter");
    let parameters = state.parameters(ParameterBag::from_pairs(pairs));
    Ok(respond(None, QueryFilterSpec::from_parameters(&parameters)?))
}

/// GET /api/v1/filter
pub async fn legacy_filter_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<FilterResponse>, ApiError> {
    let _timer = RequestTimer::start("legacy_filter");
    let parameters = state.parameters(ParameterBag::from_pairs(pairs));
    Ok(respond(None, QueryFilterSpec::from_legacy_parameters(&parameters)?))
}

/// POST /api/v2/filter with a JSON request body
pub async fn filter_body_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<FilterResponse>, ApiError> {
    let _timer = RequestTimer::start("filter_body");
    let request = RequestParameterSet::from_json(&body)?;
    let kind = match request.kind {
        RequestKind::Simple { .. } => "simple",
        RequestKind::Styled(_) => "styled",
    };
    let parameters = state.parameters(request.effective_parameters());
    Ok(respond(Some(kind), QueryFilterSpec::from_parameters(&parameters)?))
}

fn respond(request_kind: Option<&'static str>, filter: QueryFilterSpec) -> Json<FilterResponse> {
    let datasets = filter
        .id_filters_of(EntityKind::Dataset)
        .flat_map(|f| f.id_set().ids().iter().cloned())
        .collect();
    Json(FilterResponse {
        request_kind,
        datasets,
        filter,
    })
}
