use std::sync::Arc;

use axum::{
    Form,
    extract::{Query, State},
    http::header::SET_COOKIE,
    response::{Html, IntoResponse, Redirect, Response},
};

use super::templates;
use crate::auth::{SessionToken, removal_cookie, session_cookie};
use crate::server::AppState;
use crate::server::dto::{LoginForm, MessageQuery};

pub async fn login_page(
    State(state): State<Arc<AppState>>,
    SessionToken(token): SessionToken,
    Query(query): Query<MessageQuery>,
) -> Response {
    if token.is_some_and(|t| state.sessions.is_valid(&t)) {
        return Redirect::to("/").into_response();
    }

    Html(templates::login_page(query.error.as_deref())).into_response()
}

pub async fn login(State(state): State<Arc<AppState>>, Form(form): Form<LoginForm>) -> Response {
    if !state.admin_password.verify(&form.password) {
        tracing::warn!("Failed admin login attempt");
        return Redirect::to("/login?error=invalid").into_response();
    }

    let token = state.sessions.create();
    let cookie = session_cookie(token, state.sessions.ttl());
    tracing::info!("Admin signed in");

    ([(SET_COOKIE, cookie.to_string())], Redirect::to("/")).into_response()
}

pub async fn logout(
    State(state): State<Arc<AppState>>,
    SessionToken(token): SessionToken,
) -> Response {
    if let Some(token) = token {
        state.sessions.delete(&token);
    }

    (
        [(SET_COOKIE, removal_cookie().to_string())],
        Redirect::to("/login"),
    )
        .into_response()
}
