use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::server::AppState;
use crate::server::dto::AddAccessRequest;
use crate::server::response::{ApiError, ApiJson, StoreResultExt};
use crate::server::validation::validate_group_keys;
use crate::types::AccessGrant;

pub async fn list_user_access(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<AccessGrant>>, ApiError> {
    let grants = state
        .with_store(move |store| store.list_user_access(user_id))
        .await?;

    Ok(Json(grants))
}

/// Grants the requested groups, skipping any the user already has.
pub async fn add_user_access(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    ApiJson(req): ApiJson<AddAccessRequest>,
) -> Result<StatusCode, ApiError> {
    validate_group_keys(&req.group_keys)?;

    let added = state
        .with_store(move |store| {
            let mut new_keys = Vec::with_capacity(req.group_keys.len());
            for key in req.group_keys {
                if !new_keys.contains(&key) && !store.access_exists(user_id, key)? {
                    new_keys.push(key);
                }
            }

            if !new_keys.is_empty() {
                store.add_user_groups(user_id, &new_keys)?;
            }
            Ok(new_keys.len())
        })
        .await?;

    tracing::info!("Granted {added} new group(s) to user {user_id}");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove_access(
    State(state): State<Arc<AppState>>,
    Path(access_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .with_store(move |store| store.remove_access(access_id))
        .await
        .not_found_as("Access record not found")?;

    Ok(StatusCode::NO_CONTENT)
}
