//! Collection endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    Json,
};
use query_filter::{Pagination, ParameterBag, QueryFilterSpec};
use serde::Serialize;

use crate::catalog::{Collection, EntitySummary};
use crate::error::ApiError;
use crate::metrics::RequestTimer;
use crate::state::AppState;

/// API generation a request was made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiVersion {
    /// Legacy API, implies stationary in-situ measurements.
    V1,
    V2,
}

#[derive(Debug, Serialize)]
pub struct CollectionResponse {
    pub collection: Collection,
    /// Matching entities before pagination.
    pub total: usize,
    pub pagination: Pagination,
    pub items: Vec<EntitySummary>,
}

/// GET /api/v2/:collection
pub async fn collection_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(collection): Path<String>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<CollectionResponse>, ApiError> {
    let _timer = RequestTimer::start("collection");
    list_collection(&state, &collection, ParameterBag::from_pairs(pairs), ApiVersion::V2)
        .await
        .map(Json)
}

/// GET /api/v1/:collection
pub async fn legacy_collection_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(collection): Path<String>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<CollectionResponse>, ApiError> {
    let _timer = RequestTimer::start("legacy_collection");
    list_collection(&state, &collection, ParameterBag::from_pairs(pairs), ApiVersion::V1)
        .await
        .map(Json)
}

/// Resolve the request, query the catalog and project the collection.
pub async fn list_collection(
    state: &AppState,
    collection: &str,
    request: ParameterBag,
    version: ApiVersion,
) -> Result<CollectionResponse, ApiError> {
    let collection: Collection = collection
        .parse()
        .map_err(ApiError::UnknownCollection)?;

    let parameters = state.parameters(request);
    let spec = match version {
        ApiVersion::V1 => QueryFilterSpec::from_legacy_parameters(&parameters)?,
        ApiVersion::V2 => QueryFilterSpec::from_parameters(&parameters)?,
    };

    let datasets = state.catalog.find_datasets(&spec).await?;
    let mut items = collection.project(&datasets, spec.expanded);
    if let Some(term) = spec.search_term.as_deref() {
        items.retain(|item| item.matches_search_term(term));
    }

    let total = items.len();
    let items = spec.pagination.apply(items);

    tracing::info!(
        collection = %collection,
        total,
        returned = items.len(),
        "Listed collection"
    );

    Ok(CollectionResponse {
        collection,
        total,
        pagination: spec.pagination,
        items,
    })
}
