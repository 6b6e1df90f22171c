mod access;
mod groups;
mod users;

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get},
};

use crate::server::AppState;

pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        // User routes
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        // Access routes
        .route(
            "/users/{id}/access",
            get(access::list_user_access).post(access::add_user_access),
        )
        .route("/access/{id}", delete(access::remove_access))
        // Group routes
        .route("/groups/search", get(groups::search_groups))
        .route("/groups/{key}", get(groups::get_group))
}
