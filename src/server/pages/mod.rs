mod auth;
mod settings;
pub mod templates;

use std::sync::Arc;

use axum::{Router, response::Html, routing::get};

use crate::server::AppState;

async fn index_page() -> Html<String> {
    Html(templates::index_page())
}

pub fn pages_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index_page))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        .route(
            "/settings",
            get(settings::settings_page).post(settings::save_settings),
        )
}
