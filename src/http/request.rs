//! Per-request tracing context.
//!
//! # Design Decisions
//! - Every request gets a UUID v4 id, recorded on its span only
//! - Headers are not touched, so the backend sees the client's exact headers

use axum::body::Body;
use axum::http::Request;
use tracing::Span;
use uuid::Uuid;

/// Unique identifier attached to a request's span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Span factory for `TraceLayer::make_span_with`.
pub fn make_request_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "request",
        request_id = %RequestId::new(),
        method = %request.method(),
        uri = %request.uri(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_ids_are_unique() {
        assert_ne!(RequestId::new(), RequestId::new());
    }

    #[test]
    fn request_id_displays_as_uuid() {
        let id = RequestId::new().to_string();
        assert_eq!(id.len(), 36);
        assert!(Uuid::parse_str(&id).is_ok());
    }
}
