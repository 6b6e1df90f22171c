#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use rusqlite::params;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use accessdesk::auth::AdminPassword;
use accessdesk::config::{SETTINGS_FILE_NAME, Settings, SettingsStore};
use accessdesk::server::{AppState, create_router};
use accessdesk::store::{SqliteConnector, SqliteStore};

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("parse json body")
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    pub fn set_cookie(&self) -> Option<&str> {
        self.headers
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
    }
}

pub struct TestApp {
    pub temp_dir: TempDir,
    pub state: Arc<AppState>,
    pub router: Router,
}

pub struct TestAppBuilder {
    admin_password: Option<String>,
    credentials: bool,
}

impl TestAppBuilder {
    pub fn admin_password(mut self, password: &str) -> Self {
        self.admin_password = Some(password.to_string());
        self
    }

    pub fn without_credentials(mut self) -> Self {
        self.credentials = false;
        self
    }

    pub fn build(self) -> TestApp {
        let temp_dir = TempDir::new().expect("create temp dir");

        let static_dir = temp_dir.path().join("static");
        std::fs::create_dir_all(static_dir.join("js")).expect("create static dir");
        std::fs::write(static_dir.join("js/app.js"), "console.log('ok');")
            .expect("write static file");
        std::fs::write(temp_dir.path().join("secret.txt"), "top secret")
            .expect("write secret file");

        let settings = if self.credentials {
            Settings {
                username: "reader".to_string(),
                password: "db-pass".to_string(),
                ..Settings::default()
            }
        } else {
            Settings::default()
        };

        let settings_store = SettingsStore::new(
            temp_dir.path().join("config").join(SETTINGS_FILE_NAME),
            None,
        );
        let connector = Arc::new(SqliteConnector::new(temp_dir.path().join("data")));

        let state = Arc::new(
            AppState::new(
                settings_store,
                settings,
                connector,
                AdminPassword::new(self.admin_password),
            )
            .with_static_dir(static_dir),
        );
        state.reconnect().expect("connect test database");

        let router = create_router(state.clone());

        TestApp {
            temp_dir,
            state,
            router,
        }
    }
}

impl TestApp {
    pub fn builder() -> TestAppBuilder {
        TestAppBuilder {
            admin_password: None,
            credentials: true,
        }
    }

    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn database_path(&self) -> PathBuf {
        self.temp_dir
            .path()
            .join("data")
            .join("data")
            .join("reporting.db")
    }

    pub fn data_root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Groups are read-only through the API, so tests write them directly.
    pub fn seed_group(&self, key: i64, name: &str, level2: &str, level3: &str) {
        let store = SqliteStore::new(self.database_path()).expect("open test database");
        store
            .connection()
            .execute(
                "INSERT INTO groups (group_key, group_name, level2_name, level3_name)
                 VALUES (?1, ?2, ?3, ?4)",
                params![key, name, level2, level3],
            )
            .expect("seed group");
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("route request");

        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body")
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("build request"),
        )
        .await
    }

    pub async fn get_with_cookie(&self, uri: &str, cookie: &str) -> TestResponse {
        self.send(
            Request::builder()
                .uri(uri)
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .expect("build request"),
        )
        .await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(
            Request::builder()
                .method(Method::DELETE)
                .uri(uri)
                .body(Body::empty())
                .expect("build request"),
        )
        .await
    }

    pub async fn json(&self, method: Method, uri: &str, body: Value) -> TestResponse {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("build request"),
        )
        .await
    }

    pub async fn form(&self, uri: &str, body: &str) -> TestResponse {
        self.send(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .expect("build request"),
        )
        .await
    }

    pub async fn create_user(&self, email: &str) -> i64 {
        let resp = self
            .json(
                Method::POST,
                "/api/users",
                serde_json::json!({ "email": email }),
            )
            .await;
        assert_eq!(resp.status, StatusCode::CREATED, "{}", resp.text());
        resp.json()["id"].as_i64().expect("user id")
    }
}
