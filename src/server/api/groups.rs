use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::server::AppState;
use crate::server::dto::SearchParams;
use crate::server::response::{ApiError, StoreOptionExt};
use crate::types::{Group, SearchResult};

pub async fn search_groups(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<SearchResult>>, ApiError> {
    if params.q.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let results = state
        .with_store(move |store| store.search_groups(&params.q))
        .await?;

    Ok(Json(results))
}

pub async fn get_group(
    State(state): State<Arc<AppState>>,
    Path(key): Path<i64>,
) -> Result<Json<Group>, ApiError> {
    let group = state
        .with_store(move |store| store.get_group(key))
        .await?
        .or_not_found("Group not found")?;

    Ok(Json(group))
}
