//! Static bundle serving with client-side routing fallback.
//!
//! Lookup order for every non-API request:
//!   1. configured mounts (`/assets`, `/images`, ...) with their cache lifetime
//!   2. the dist root, without a cache header (`dir/` serves `dir/index.html`)
//!   3. `index.html` for anything still unmatched, whatever the method

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header::CACHE_CONTROL, request::Parts, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};
use tracing::warn;

use crate::state::{AppState, SharedState};

pub async fn serve_site(State(state): State<SharedState>, request: Request) -> Response {
    let (parts, _body) = request.into_parts();
    let path = parts.uri.path();

    for mount in &state.mounts {
        let Some(rest) = mount.strip(path) else { continue };

        if let Some(mut response) = try_static(ServeDir::new(&mount.dir), &parts, rest).await {
            if let Some(cache) = &mount.cache_control {
                if response.status().is_success() || response.status() == StatusCode::NOT_MODIFIED {
                    response.headers_mut().insert(CACHE_CONTROL, cache.clone());
                }
            }
            return response;
        }
    }

    if let Some(response) = try_static(ServeDir::new(&state.dist_dir), &parts, path).await {
        return response;
    }

    spa_fallback(&state, &parts).await
}

/// `None` when the directory has nothing for this request, so the next stage runs.
///
/// A directory named without its trailing slash makes `ServeDir` answer with a
/// redirect; that counts as a miss too, so such paths reach the entry document.
async fn try_static(dir: ServeDir, parts: &Parts, path: &str) -> Option<Response> {
    let request = rebuild(parts, parts.method.clone(), path)?;
    let response = match dir.oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    };

    match response.status() {
        StatusCode::NOT_FOUND | StatusCode::METHOD_NOT_ALLOWED | StatusCode::TEMPORARY_REDIRECT => None,
        _ => Some(response.map(Body::new)),
    }
}

async fn spa_fallback(state: &AppState, parts: &Parts) -> Response {
    let method = if parts.method == Method::HEAD { Method::HEAD } else { Method::GET };
    let Some(request) = rebuild(parts, method, "/") else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    let index = state.index_file();
    let response = match ServeFile::new(&index).oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    };

    if response.status() == StatusCode::NOT_FOUND {
        warn!("Entry document {} is missing", index.display());
    }
    response.map(Body::new)
}

/// Copy of the incoming request head pointed at `path`, with the query kept.
fn rebuild(parts: &Parts, method: Method, path: &str) -> Option<Request> {
    let target = match parts.uri.query() {
        Some(query) => format!("{path}?{query}"),
        None => path.to_string(),
    };
    let uri = Uri::try_from(target).ok()?;

    let mut request = Request::new(Body::empty());
    *request.method_mut() = method;
    *request.uri_mut() = uri;
    *request.headers_mut() = parts.headers.clone();
    Some(request)
}
