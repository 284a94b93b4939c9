//! URL prefix normalization.
//!
//! # Design Decisions
//! - Pure functions, applied once while assembling the config
//! - Every normalization is idempotent
//! - The frontend prefix keeps its trailing slash, the backend prefix drops it

/// Default mount point for static pages.
pub const DEFAULT_FRONTEND_PATH: &str = "/";

/// Default mount point for the proxied API.
pub const DEFAULT_BACKEND_PATH: &str = "/ws";

/// Normalize the frontend prefix: leading slash, and a trailing slash unless
/// the prefix is the root.
pub fn normalize_frontend_path(raw: Option<&str>) -> String {
    let raw = raw.unwrap_or(DEFAULT_FRONTEND_PATH);
    let mut path = with_leading_slash(raw);
    if path.len() > 1 && !path.ends_with('/') {
        path.push('/');
    }
    path
}

/// The frontend prefix without its trailing slash, or `None` for the root.
pub fn no_slash_frontend(frontend_path: &str) -> Option<String> {
    if frontend_path.len() <= 1 {
        return None;
    }
    Some(frontend_path.trim_end_matches('/').to_string()).filter(|p| !p.is_empty())
}

/// Normalize the backend prefix by stripping trailing slashes.
///
/// `None` selects the default. `"/"` and `""` become the empty string,
/// meaning the proxy is mounted at the root.
pub fn normalize_backend_path(raw: Option<&str>) -> String {
    let raw = raw.unwrap_or(DEFAULT_BACKEND_PATH);
    let trimmed = raw.trim_end_matches('/');
    if trimmed.is_empty() {
        return String::new();
    }
    with_leading_slash(trimmed)
}

fn with_leading_slash(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}
