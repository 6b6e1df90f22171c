use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header::COOKIE, request::Parts},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use cookie::{Cookie, SameSite};

use crate::server::AppState;

pub const SESSION_COOKIE_NAME: &str = "accessdesk_session";

/// Session token from the request cookie, if any. Never rejects.
pub struct SessionToken(pub Option<String>);

impl FromRequestParts<Arc<AppState>> for SessionToken {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        Ok(SessionToken(session_token(&parts.headers)))
    }
}

/// Finds the session cookie across all `Cookie` headers.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .filter_map(|chunk| Cookie::parse(chunk.trim()).ok())
        .find(|c| c.name() == SESSION_COOKIE_NAME)
        .map(|c| c.value().to_string())
}

/// Paths reachable without a session.
#[must_use]
pub fn is_public_path(path: &str) -> bool {
    matches!(path, "/login" | "/logout" | "/health") || path.starts_with("/static/")
}

pub fn session_cookie(token: String, ttl: chrono::Duration) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(cookie::time::Duration::seconds(ttl.num_seconds()))
        .build()
}

pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build((SESSION_COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .build();
    cookie.make_removal();
    cookie
}

/// Redirects to the login page unless the request carries a live session.
/// Everything passes when no admin password is configured.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    if is_public_path(request.uri().path()) || !state.admin_password.is_enabled() {
        return next.run(request).await;
    }

    match session_token(request.headers()) {
        Some(token) if state.sessions.is_valid(&token) => next.run(request).await,
        _ => {
            tracing::debug!("No valid session for {}", request.uri().path());
            Redirect::to("/login").into_response()
        }
    }
}
