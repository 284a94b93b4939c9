//! Configuration schema definitions.
//!
//! The resolved configuration is assembled once at startup by
//! [`crate::config::loader::resolve_config`] and is immutable afterwards.
//! All types derive `Serialize` so the running config can be printed.

use std::path::PathBuf;

use serde::Serialize;

/// Root configuration for the gateway.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Listener configuration (IP and port).
    pub listener: ListenerConfig,

    /// Mount point of the static frontend. Always starts with `/` and,
    /// unless it is the root, ends with `/`.
    pub frontend_path: String,

    /// `frontend_path` without its trailing slash; `None` for the root.
    pub no_slash_frontend: Option<String>,

    /// Directory served under `frontend_path`.
    pub static_dir: PathBuf,

    /// Mount point of the proxied API, without trailing slash.
    /// Empty means the proxy owns the root.
    pub backend_path: String,

    /// Linked components found in the environment, in discovery order.
    pub components: Vec<String>,

    /// The component chosen as backend, if any.
    pub backend_component: Option<String>,

    /// `host:port` the proxy forwards to.
    pub backend_host: Option<String>,

    /// How the backend was chosen.
    pub backend_config_desc: String,

    /// Why no backend could be chosen.
    pub backend_config_error: Option<String>,

    /// Prometheus exporter address; metrics are off when `None`.
    pub metrics_address: Option<String>,
}

/// Listener configuration.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ListenerConfig {
    /// Interface to bind (`IP`).
    pub ip: String,

    /// Port to bind (`PORT`).
    pub port: String,
}

impl ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub fn bind_address(&self) -> String {
        if self.ip.contains(':') && !self.ip.starts_with('[') {
            format!("[{}]:{}", self.ip, self.port)
        } else {
            format!("{}:{}", self.ip, self.port)
        }
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            ip: "0.0.0.0".to_string(),
            port: "8080".to_string(),
        }
    }
}
