//! Static frontend under `frontend_path`.
//!
//! Everything the proxy middleware does not claim falls through to here.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode, Uri};
use axum::response::{IntoResponse, Redirect, Response};
use tower::ServiceExt;
use tower_http::services::ServeDir;

use crate::config::ResolvedConfig;

/// State for the frontend fallback.
#[derive(Clone)]
pub struct FrontendState {
    frontend_path: String,
    no_slash_frontend: Option<String>,
    assets: ServeDir,
}

impl FrontendState {
    pub fn new(config: &ResolvedConfig) -> Self {
        Self {
            frontend_path: config.frontend_path.clone(),
            no_slash_frontend: config.no_slash_frontend.clone(),
            assets: ServeDir::new(&config.static_dir),
        }
    }

    /// Where a request path lands: redirect, a path inside the static
    /// directory, or nowhere.
    fn locate<'a>(&self, path: &'a str) -> Lookup<'a> {
        match &self.no_slash_frontend {
            None => Lookup::Asset(path),
            Some(prefix) if path == prefix => Lookup::Redirect,
            Some(prefix) => match path.strip_prefix(prefix.as_str()) {
                Some(rest) if rest.starts_with('/') => Lookup::Asset(rest),
                _ => Lookup::NotFound,
            },
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Lookup<'a> {
    Redirect,
    Asset(&'a str),
    NotFound,
}

/// Serve static files, redirecting the slash-less prefix.
pub async fn frontend_handler(
    State(state): State<Arc<FrontendState>>,
    request: Request<Body>,
) -> Response {
    let path = request.uri().path().to_string();

    let asset_path = match state.locate(&path) {
        Lookup::Redirect => return Redirect::permanent(&state.frontend_path).into_response(),
        Lookup::NotFound => return StatusCode::NOT_FOUND.into_response(),
        Lookup::Asset(rest) => rest.to_string(),
    };

    let (mut parts, body) = request.into_parts();
    let rewritten = match parts.uri.query() {
        Some(query) => format!("{asset_path}?{query}"),
        None => asset_path,
    };
    parts.uri = match rewritten.parse::<Uri>() {
        Ok(uri) => uri,
        Err(e) => {
            tracing::debug!(path = %path, error = %e, "Unparseable asset path");
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    match state
        .assets
        .clone()
        .oneshot(Request::from_parts(parts, body))
        .await
    {
        Ok(response) => response.map(Body::new),
        Err(never) => match never {},
    }
}
