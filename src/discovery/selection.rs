//! Backend selection.
//!
//! # Precedence (highest wins)
//! 1. `BACKEND_SERVICE`, used verbatim
//! 2. `BACKEND_COMPONENT_NAME`, matched upper-cased against discovered names
//! 3. First discovered component
//! 4. Nothing: reported as a configuration error, never raised

use crate::config::env::EnvVars;
use crate::discovery::components::lookup_component;

pub const BACKEND_SERVICE: &str = "BACKEND_SERVICE";
pub const BACKEND_COMPONENT_NAME: &str = "BACKEND_COMPONENT_NAME";

/// Outcome of backend selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendSelection {
    /// Explicit `BACKEND_SERVICE` override.
    Override { host: String },
    /// Component chosen through `BACKEND_COMPONENT_NAME`.
    Named { component: String, host: String },
    /// First discovered component.
    Default { component: String, host: String },
    /// No override and no linked component.
    Unresolved,
}

impl BackendSelection {
    pub fn host(&self) -> Option<&str> {
        match self {
            Self::Override { host } | Self::Named { host, .. } | Self::Default { host, .. } => {
                Some(host.as_str())
            }
            Self::Unresolved => None,
        }
    }

    pub fn component(&self) -> Option<&str> {
        match self {
            Self::Named { component, .. } | Self::Default { component, .. } => {
                Some(component.as_str())
            }
            Self::Override { .. } | Self::Unresolved => None,
        }
    }

    /// Operator-facing description of how the backend was chosen.
    pub fn description(&self) -> String {
        match self {
            Self::Override { host } => format!("Backend set by {BACKEND_SERVICE} to {host}"),
            Self::Named { component, host } => {
                format!("Backend component {component} selected by {BACKEND_COMPONENT_NAME} ({host})")
            }
            Self::Default { component, host } => {
                format!("Backend component {component} selected as first linked component ({host})")
            }
            Self::Unresolved => "No backend configured".to_string(),
        }
    }

    /// Operator-facing error, present only when nothing was resolved.
    pub fn error(&self) -> Option<String> {
        match self {
            Self::Unresolved => Some(format!(
                "No linked backend component found. Link a component providing \
                 COMPONENT_<NAME>_HOST and COMPONENT_<NAME>_PORT, or set {BACKEND_SERVICE}"
            )),
            _ => None,
        }
    }
}

/// Pick the backend host from the environment and the discovered components.
pub fn select_backend(env: &EnvVars, components: &[String]) -> BackendSelection {
    if let Some(host) = env.get_non_empty(BACKEND_SERVICE) {
        return BackendSelection::Override {
            host: host.to_string(),
        };
    }

    if let Some(requested) = env.get_non_empty(BACKEND_COMPONENT_NAME) {
        let wanted = requested.to_uppercase();
        let found = components
            .iter()
            .find(|name| **name == wanted)
            .and_then(|name| lookup_component(env, name));
        match found {
            Some(component) => {
                return BackendSelection::Named {
                    host: component.address(),
                    component: component.name,
                };
            }
            None => {
                tracing::warn!(
                    requested = %requested,
                    available = ?components,
                    "Requested backend component is not linked, falling back to the first component"
                );
            }
        }
    }

    components
        .iter()
        .find_map(|name| lookup_component(env, name))
        .map(|component| BackendSelection::Default {
            host: component.address(),
            component: component.name,
        })
        .unwrap_or(BackendSelection::Unresolved)
}
