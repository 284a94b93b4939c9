//! Proxy error type and its mapping to client responses.

use axum::http::uri::InvalidUri;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Failures while forwarding a request to the backend.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    /// No backend host was resolved at startup.
    #[error("no backend configured")]
    NoBackend,

    /// The backend host and request path do not form a valid URI.
    #[error("invalid backend url {url}: {source}")]
    InvalidTarget {
        url: String,
        #[source]
        source: InvalidUri,
    },

    /// Connecting to or exchanging with the backend failed.
    #[error("upstream request to {url} failed: {source}")]
    Upstream {
        url: String,
        #[source]
        source: hyper_util::client::legacy::Error,
    },
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        StatusCode::BAD_GATEWAY
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let message = match self {
            ProxyError::NoBackend => "Backend not configured",
            ProxyError::InvalidTarget { .. } | ProxyError::Upstream { .. } => {
                "Upstream request failed"
            }
        };
        (self.status(), message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_backend_is_bad_gateway() {
        let response = ProxyError::NoBackend.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn invalid_target_message_names_url() {
        let source = "http://bad host/".parse::<axum::http::Uri>().unwrap_err();
        let err = ProxyError::InvalidTarget {
            url: "http://bad host/".into(),
            source,
        };
        assert!(err.to_string().contains("http://bad host/"));
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }
}
