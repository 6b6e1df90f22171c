use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::server::AppState;
use crate::server::dto::{CreateUserResponse, EmailRequest, ListUsersParams};
use crate::server::response::{ApiError, ApiJson, StoreOptionExt, StoreResultExt};
use crate::server::validation::validate_email;
use crate::types::{SortDir, User, UserSort};

pub async fn list_users(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListUsersParams>,
) -> Result<Json<Vec<User>>, ApiError> {
    let sort = UserSort::parse(&params.sort);
    let dir = SortDir::parse(&params.dir);

    let users = state
        .with_store(move |store| store.list_users(&params.filter, sort, dir))
        .await?;

    Ok(Json(users))
}

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<EmailRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = validate_email(&req.email)?;

    let id = state
        .with_store(move |store| store.create_user(&email))
        .await?;

    tracing::info!("Created user {id}");
    Ok((StatusCode::CREATED, Json(CreateUserResponse { id })))
}

pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<User>, ApiError> {
    let user = state
        .with_store(move |store| store.get_user(id))
        .await?
        .or_not_found("User not found")?;

    Ok(Json(user))
}

pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    ApiJson(req): ApiJson<EmailRequest>,
) -> Result<StatusCode, ApiError> {
    let email = validate_email(&req.email)?;

    state
        .with_store(move |store| store.update_user(id, &email))
        .await
        .not_found_as("User not found")?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .with_store(move |store| store.delete_user(id))
        .await
        .not_found_as("User not found")?;

    tracing::info!("Deleted user {id} and their access grants");
    Ok(StatusCode::NO_CONTENT)
}
