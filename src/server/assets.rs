use std::path::{Component, Path as FsPath, PathBuf};
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

use super::AppState;
use super::response::ApiError;

/// Serves a file from the static directory. Anything that would escape the
/// directory is reported as missing.
pub async fn serve_static(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> Result<Response, ApiError> {
    let Some(file) = resolve(&state.static_dir, &path) else {
        tracing::debug!("Rejected static path {path:?}");
        return Err(ApiError::not_found("File not found"));
    };

    let body = match tokio::fs::read(&file).await {
        Ok(body) => body,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ApiError::not_found("File not found"));
        }
        Err(e) => {
            if file.is_dir() {
                return Err(ApiError::not_found("File not found"));
            }
            tracing::error!("Failed to read static file {}: {e}", file.display());
            return Err(ApiError::internal("Failed to read file"));
        }
    };

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(content_type(&file)),
    );

    Ok((StatusCode::OK, headers, body).into_response())
}

/// Joins `requested` onto `root` when every segment is a plain name.
fn resolve(root: &FsPath, requested: &str) -> Option<PathBuf> {
    if requested.is_empty() || requested.contains('\\') {
        return None;
    }

    let mut resolved = root.to_path_buf();
    for component in FsPath::new(requested).components() {
        match component {
            Component::Normal(segment) => resolved.push(segment),
            Component::CurDir => {}
            _ => return None,
        }
    }

    (resolved != root).then_some(resolved)
}

fn content_type(path: &FsPath) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "js" => "text/javascript; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "html" | "htm" => "text/html; charset=utf-8",
        "json" => "application/json",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "ico" => "image/x-icon",
        "txt" => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}
