//! Pass-through proxy to the discovered backend.
//!
//! # Responsibilities
//! - Mount on `backend_path` for every method and sub-path
//! - Rewrite `<backend_path><rest>` to `http://<backend_host><rest>`
//! - Stream the request body out and the response body back
//! - Log failures with the attempted backend URL
//!
//! # Design Decisions
//! - The prefix is compared as a literal string, never parsed as a route pattern
//! - One attempt per request, no retry or backoff
//! - No buffering: bodies are handed to hyper as streams
//! - Method, status and headers pass through; only `Host` is rewritten

use std::sync::Arc;
use std::time::Instant;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, Uri, Version};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use futures_util::TryStreamExt;
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;

use crate::config::ResolvedConfig;
use crate::http::error::ProxyError;
use crate::observability;

/// Pooled HTTP/1.1 client used for all upstream requests.
pub type HttpClient = Client<HttpConnector, Body>;

/// State injected into the proxy handler.
#[derive(Clone)]
pub struct ProxyState {
    pub config: Arc<ResolvedConfig>,
    pub client: HttpClient,
}

impl ProxyState {
    pub fn new(config: Arc<ResolvedConfig>) -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Self { config, client }
    }
}

/// True when `path` is `backend_path` itself or lies below it.
///
/// An empty `backend_path` mounts the proxy at the root and claims everything.
pub fn is_proxied_path(backend_path: &str, path: &str) -> bool {
    match path.strip_prefix(backend_path) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || backend_path.is_empty(),
        None => false,
    }
}

/// Claims requests under `backend_path`; everything else continues to `next`.
pub async fn proxy_middleware(
    State(state): State<ProxyState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if !is_proxied_path(&state.config.backend_path, request.uri().path()) {
        return next.run(request).await;
    }
    proxy_handler(state, request).await.into_response()
}

/// Forward one request and relay the backend's answer.
pub async fn proxy_handler(
    state: ProxyState,
    request: Request<Body>,
) -> Result<Response, ProxyError> {
    let start = Instant::now();
    let method = request.method().clone();

    let result = forward(&state, request).await;

    let status = match &result {
        Ok(response) => response.status(),
        Err(e) => {
            tracing::error!(method = %method, error = %e, "Proxy request failed");
            e.status()
        }
    };
    observability::metrics::record_request(method.as_str(), status.as_u16(), start);

    result
}

async fn forward(state: &ProxyState, request: Request<Body>) -> Result<Response, ProxyError> {
    let backend_host = state
        .config
        .backend_host
        .as_deref()
        .ok_or(ProxyError::NoBackend)?;
    let target = target_uri(backend_host, &state.config.backend_path, request.uri())?;
    let url = target.to_string();

    tracing::debug!(
        method = %request.method(),
        backend_url = %url,
        "Forwarding request"
    );

    let (mut parts, body) = request.into_parts();
    parts.uri = target;
    parts.version = Version::HTTP_11;
    parts.headers.remove(header::HOST);

    let upstream = state
        .client
        .request(Request::from_parts(parts, body))
        .await
        .map_err(|source| ProxyError::Upstream {
            url: url.clone(),
            source,
        })?;

    let (parts, body) = upstream.into_parts();
    let body = Body::new(body).into_data_stream().inspect_err(move |error| {
        tracing::warn!(backend_url = %url, error = %error, "Upstream response stream failed");
    });

    Ok(Response::from_parts(parts, Body::from_stream(body)))
}

/// Build the backend URI for an inbound request URI.
///
/// The mount prefix is stripped; the query string is kept.
pub fn target_uri(backend_host: &str, backend_path: &str, uri: &Uri) -> Result<Uri, ProxyError> {
    let path_and_query = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    let rest = path_and_query
        .strip_prefix(backend_path)
        .unwrap_or(path_and_query);

    let url = if rest.starts_with('/') {
        format!("http://{backend_host}{rest}")
    } else {
        format!("http://{backend_host}/{rest}")
    };

    url.parse::<Uri>()
        .map_err(|source| ProxyError::InvalidTarget { url, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(backend_path: &str, uri: &str) -> String {
        let uri: Uri = uri.parse().unwrap();
        target_uri("localhost:9000", backend_path, &uri)
            .unwrap()
            .to_string()
    }

    #[test]
    fn strips_mount_prefix_and_keeps_query() {
        assert_eq!(
            target("/ws", "/ws/getRandomObject?gameId=7"),
            "http://localhost:9000/getRandomObject?gameId=7"
        );
    }

    #[test]
    fn mount_point_itself_maps_to_root() {
        assert_eq!(target("/ws", "/ws"), "http://localhost:9000/");
        assert_eq!(target("/ws", "/ws/"), "http://localhost:9000/");
        assert_eq!(target("/ws", "/ws?x=1"), "http://localhost:9000/?x=1");
    }

    #[test]
    fn root_mount_forwards_whole_path() {
        assert_eq!(target("", "/a/b?c=d"), "http://localhost:9000/a/b?c=d");
    }

    #[test]
    fn prefix_matching_is_literal() {
        assert!(is_proxied_path("/ws", "/ws"));
        assert!(is_proxied_path("/ws", "/ws/"));
        assert!(is_proxied_path("/ws", "/ws/getRandomObject"));
        assert!(!is_proxied_path("/ws", "/wsx"));
        assert!(!is_proxied_path("/ws", "/index.html"));

        assert!(is_proxied_path("/{id}", "/{id}/x"));
        assert!(!is_proxied_path("/{id}", "/7/x"));
        assert!(is_proxied_path("/:api", "/:api/status"));
        assert!(is_proxied_path("/api{v1}x{", "/api{v1}x{/a"));
        assert!(!is_proxied_path("/api{v1}x{", "/api/a"));
    }

    #[test]
    fn root_mount_claims_everything() {
        assert!(is_proxied_path("", "/"));
        assert!(is_proxied_path("", "/anything/at/all"));
    }

    #[test]
    fn invalid_host_is_reported() {
        let uri: Uri = "/ws/x".parse().unwrap();
        let err = target_uri("bad host", "/ws", &uri).unwrap_err();
        assert!(matches!(err, ProxyError::InvalidTarget { .. }));
    }
}
