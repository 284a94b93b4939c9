//! Configuration assembly from the environment.

use std::path::PathBuf;

use crate::config::env::EnvVars;
use crate::config::paths::{no_slash_frontend, normalize_backend_path, normalize_frontend_path};
use crate::config::schema::{ListenerConfig, ResolvedConfig};
use crate::discovery::{find_components, select_backend};

pub const URL_PREFIX: &str = "URL_PREFIX";
pub const BACKEND_PATH: &str = "BACKEND_PATH";
pub const PORT: &str = "PORT";
pub const IP: &str = "IP";
pub const STATIC_DIR: &str = "STATIC_DIR";
pub const METRICS_ADDRESS: &str = "METRICS_ADDRESS";

const DEFAULT_STATIC_DIR: &str = "public";

/// Build the gateway configuration from an environment snapshot.
///
/// Never fails. A missing backend is recorded in `backend_config_error`
/// so the server can still start and serve static pages.
pub fn resolve_config(env: &EnvVars) -> ResolvedConfig {
    let defaults = ListenerConfig::default();
    let listener = ListenerConfig {
        ip: env.get_non_empty(IP).map(str::to_string).unwrap_or(defaults.ip),
        port: env
            .get_non_empty(PORT)
            .map(str::to_string)
            .unwrap_or(defaults.port),
    };

    // Empty variables count as unset.
    let frontend_path = normalize_frontend_path(env.get_non_empty(URL_PREFIX));
    let no_slash_frontend = no_slash_frontend(&frontend_path);
    let backend_path = normalize_backend_path(env.get_non_empty(BACKEND_PATH));

    let components = find_components(env);
    let selection = select_backend(env, &components);

    ResolvedConfig {
        listener,
        no_slash_frontend,
        frontend_path,
        static_dir: PathBuf::from(env.get_non_empty(STATIC_DIR).unwrap_or(DEFAULT_STATIC_DIR)),
        backend_path,
        backend_component: selection.component().map(str::to_string),
        backend_host: selection.host().map(str::to_string),
        backend_config_desc: selection.description(),
        backend_config_error: selection.error(),
        components,
        metrics_address: env.get_non_empty(METRICS_ADDRESS).map(str::to_string),
    }
}

impl ResolvedConfig {
    /// Resolve from the current process environment.
    pub fn from_process_env() -> Self {
        resolve_config(&EnvVars::from_process())
    }

    /// Log the resolved configuration for operators.
    pub fn log_summary(&self) {
        tracing::info!(
            bind_address = %self.listener.bind_address(),
            frontend_path = %self.frontend_path,
            static_dir = %self.static_dir.display(),
            backend_path = %self.backend_path,
            components = ?self.components,
            "Configuration loaded"
        );

        match (&self.backend_host, &self.backend_config_error) {
            (Some(host), _) => tracing::info!(
                backend_host = %host,
                backend_component = ?self.backend_component,
                "{}",
                self.backend_config_desc
            ),
            (None, Some(error)) => tracing::error!(backend_path = %self.backend_path, "{}", error),
            (None, None) => tracing::error!("{}", self.backend_config_desc),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(pairs: &[(&str, &str)]) -> ResolvedConfig {
        resolve_config(&pairs.iter().copied().collect())
    }

    #[test]
    fn defaults_without_environment() {
        let config = resolve(&[]);
        assert_eq!(config.listener.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.frontend_path, "/");
        assert_eq!(config.no_slash_frontend, None);
        assert_eq!(config.backend_path, "/ws");
        assert_eq!(config.static_dir, PathBuf::from("public"));
        assert!(config.components.is_empty());
        assert_eq!(config.backend_host, None);
        assert_eq!(config.backend_component, None);
        assert!(config.backend_config_error.is_some());
        assert_eq!(config.metrics_address, None);
    }

    #[test]
    fn linked_component_becomes_backend() {
        let config = resolve(&[
            ("COMPONENT_BACKEND_HOST", "10.0.0.5"),
            ("COMPONENT_BACKEND_PORT", "8080"),
        ]);
        assert_eq!(config.components, vec!["BACKEND"]);
        assert_eq!(config.backend_component.as_deref(), Some("BACKEND"));
        assert_eq!(config.backend_host.as_deref(), Some("10.0.0.5:8080"));
        assert_eq!(config.backend_config_error, None);
    }

    #[test]
    fn override_is_verbatim() {
        let config = resolve(&[
            ("COMPONENT_DB_HOST", "db"),
            ("COMPONENT_DB_PORT", "5432"),
            ("BACKEND_SERVICE", "foo:1234"),
        ]);
        assert_eq!(config.backend_host.as_deref(), Some("foo:1234"));
        assert_eq!(config.backend_component, None);
        assert_eq!(config.components, vec!["DB"]);
    }

    #[test]
    fn paths_and_listener_from_environment() {
        let config = resolve(&[
            ("URL_PREFIX", "/game"),
            ("BACKEND_PATH", "/api/"),
            ("IP", "127.0.0.1"),
            ("PORT", "9090"),
            ("STATIC_DIR", "/srv/www"),
            ("METRICS_ADDRESS", "127.0.0.1:9100"),
        ]);
        assert_eq!(config.frontend_path, "/game/");
        assert_eq!(config.no_slash_frontend.as_deref(), Some("/game"));
        assert_eq!(config.backend_path, "/api");
        assert_eq!(config.listener.bind_address(), "127.0.0.1:9090");
        assert_eq!(config.static_dir, PathBuf::from("/srv/www"));
        assert_eq!(config.metrics_address.as_deref(), Some("127.0.0.1:9100"));
    }

    #[test]
    fn empty_path_variables_use_defaults() {
        let config = resolve(&[("URL_PREFIX", ""), ("BACKEND_PATH", "")]);
        assert_eq!(config.frontend_path, "/");
        assert_eq!(config.backend_path, "/ws");
    }

    #[test]
    fn slash_backend_path_mounts_at_root() {
        let config = resolve(&[("BACKEND_PATH", "/")]);
        assert_eq!(config.backend_path, "");
    }
}
