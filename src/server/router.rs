use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::{Router, routing::get};

use super::api::api_router;
use super::assets::serve_static;
use super::pages::pages_router;
use crate::auth::{AdminPassword, SessionStore, require_session};
use crate::config::{Settings, SettingsStore};
use crate::error::{Error, Result};
use crate::store::{Connector, Store};

const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(30);

pub struct AppState {
    pub settings_store: SettingsStore,
    pub connector: Arc<dyn Connector>,
    pub sessions: SessionStore,
    pub admin_password: AdminPassword,
    /// Directory served under `/static/`.
    pub static_dir: PathBuf,
    /// Deadline for a single store call made on behalf of a request.
    pub query_timeout: Duration,
    settings: RwLock<Settings>,
    store: RwLock<Option<Arc<dyn Store>>>,
}

impl AppState {
    /// Builds state with no open store. Call [`AppState::reconnect`] to open one.
    #[must_use]
    pub fn new(
        settings_store: SettingsStore,
        settings: Settings,
        connector: Arc<dyn Connector>,
        admin_password: AdminPassword,
    ) -> Self {
        Self {
            settings_store,
            connector,
            sessions: SessionStore::new(),
            admin_password,
            static_dir: PathBuf::from("static"),
            query_timeout: DEFAULT_QUERY_TIMEOUT,
            settings: RwLock::new(settings),
            store: RwLock::new(None),
        }
    }

    #[must_use]
    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = dir.into();
        self
    }

    #[must_use]
    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_sessions(mut self, sessions: SessionStore) -> Self {
        self.sessions = sessions;
        self
    }

    #[must_use]
    pub fn settings(&self) -> Settings {
        self.settings
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Persists new settings, then makes them current.
    pub fn update_settings(&self, settings: Settings) -> Result<()> {
        self.settings_store.save(&settings)?;
        *self.settings.write().unwrap_or_else(|e| e.into_inner()) = settings;
        Ok(())
    }

    /// The active store, or [`Error::StoreUnavailable`] when none is open.
    pub fn store(&self) -> Result<Arc<dyn Store>> {
        self.store
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
            .ok_or(Error::StoreUnavailable)
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.store.read().unwrap_or_else(|e| e.into_inner()).is_some()
    }

    /// Replaces the active store using the current settings.
    ///
    /// The new store is opened before the lock is taken. Requests already
    /// holding the previous store finish on it; it closes when they drop it.
    /// Without credentials, or when opening fails, no store is left active.
    pub fn reconnect(&self) -> Result<()> {
        let settings = self.settings();

        let next = if settings.has_credentials() {
            tracing::info!(
                "Connecting to database {} on {}...",
                settings.database,
                settings.server
            );
            match self.connector.connect(&settings) {
                Ok(store) => Some(store),
                Err(e) => {
                    tracing::warn!("Failed to connect to database: {e}");
                    self.replace_store(None);
                    return Err(e);
                }
            }
        } else {
            tracing::info!("No database credentials configured");
            None
        };

        let connected = next.is_some();
        self.replace_store(next);
        if connected {
            tracing::info!("Connected to database successfully");
        }
        Ok(())
    }

    fn replace_store(&self, next: Option<Arc<dyn Store>>) {
        let previous = {
            let mut guard = self.store.write().unwrap_or_else(|e| e.into_inner());
            std::mem::replace(&mut *guard, next)
        };
        drop(previous);
    }

    /// Runs a store call on the blocking pool, bounded by `query_timeout`.
    ///
    /// On timeout the response is returned immediately; the call itself runs
    /// to completion in the background.
    pub async fn with_store<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&dyn Store) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = self.store()?;
        let task = tokio::task::spawn_blocking(move || f(store.as_ref()));

        match tokio::time::timeout(self.query_timeout, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => Err(Error::Internal(format!("database task failed: {e}"))),
            Err(_) => {
                tracing::warn!(
                    "Database call exceeded {}ms deadline",
                    self.query_timeout.as_millis()
                );
                Err(Error::Timeout)
            }
        }
    }
}

async fn health() -> &'static str {
    "OK"
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let response = next.run(request).await;

    let latency = start.elapsed();
    let status = response.status();

    tracing::info!(
        "{} {} {} {}ms",
        method,
        uri.path(),
        status.as_u16(),
        latency.as_millis()
    );

    response
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(pages_router())
        .nest("/api", api_router())
        .route("/static/{*path}", get(serve_static))
        .layer(middleware::from_fn_with_state(state.clone(), require_session))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}
