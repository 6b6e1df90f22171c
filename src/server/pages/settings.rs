use std::sync::Arc;

use axum::{
    Form,
    extract::{Query, State},
    response::{Html, Redirect},
};

use super::templates::{self, SettingsView};
use crate::config::Settings;
use crate::error::Error;
use crate::server::AppState;
use crate::server::dto::{MessageQuery, SettingsForm};
use crate::server::response::ApiError;

pub async fn settings_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MessageQuery>,
) -> Html<String> {
    let settings = state.settings();
    let view = SettingsView {
        server: settings.server,
        database: settings.database,
        username: settings.username,
        has_password: !settings.password.is_empty(),
        saved: query.saved.as_deref() == Some("1"),
        connected: state.is_connected(),
        error: query.error,
    };

    Html(templates::settings_page(&view))
}

/// Saves the submitted settings and reconnects with them. An empty password
/// field keeps the stored password.
pub async fn save_settings(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SettingsForm>,
) -> Result<Redirect, ApiError> {
    let current = state.settings();
    let password = if form.password.is_empty() {
        current.password
    } else {
        form.password
    };

    let settings = Settings {
        server: form.server.trim().to_string(),
        database: form.database.trim().to_string(),
        username: form.username.trim().to_string(),
        password,
    };

    // Save and reconnect run together on the blocking pool.
    let task_state = state.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        task_state.update_settings(settings)?;
        tracing::info!(
            "Settings saved to {}",
            task_state.settings_store.path().display()
        );
        Ok::<_, Error>(task_state.reconnect().is_ok())
    })
    .await
    .map_err(|e| ApiError::internal(format!("Settings task failed: {e}")))?;

    match outcome {
        Ok(true) => Ok(Redirect::to("/settings?saved=1")),
        Ok(false) => Ok(Redirect::to("/settings?saved=1&error=connection")),
        Err(e) => {
            tracing::error!("Failed to save settings: {e}");
            Err(ApiError::internal("Failed to save settings"))
        }
    }
}
