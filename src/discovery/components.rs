//! Linked component scanning.
//!
//! A component `<NAME>` is declared by a pair of variables,
//! `COMPONENT_<NAME>_HOST` and `COMPONENT_<NAME>_PORT`, both non-empty.

use serde::Serialize;

use crate::config::env::EnvVars;

const COMPONENT_PREFIX: &str = "COMPONENT_";
const HOST_SUFFIX: &str = "_HOST";
const PORT_SUFFIX: &str = "_PORT";

/// A linked backend service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Component {
    pub name: String,
    pub host: String,
    pub port: String,
}

impl Component {
    /// `host:port`, the form the proxy dials.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Name of the variable holding a component's host.
pub fn host_var(name: &str) -> String {
    format!("{COMPONENT_PREFIX}{name}{HOST_SUFFIX}")
}

/// Name of the variable holding a component's port.
pub fn port_var(name: &str) -> String {
    format!("{COMPONENT_PREFIX}{name}{PORT_SUFFIX}")
}

/// Extract `<NAME>` from a `COMPONENT_<NAME>_HOST` key.
fn component_name(key: &str) -> Option<&str> {
    key.strip_prefix(COMPONENT_PREFIX)?
        .strip_suffix(HOST_SUFFIX)
        .filter(|name| !name.is_empty())
}

/// Names of all fully declared components, in snapshot order.
pub fn find_components(env: &EnvVars) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for key in env.keys() {
        let Some(name) = component_name(key) else {
            continue;
        };
        if found.iter().any(|n| n == name) {
            continue;
        }
        if lookup_component(env, name).is_some() {
            tracing::debug!(component = %name, "Discovered linked component");
            found.push(name.to_string());
        }
    }
    found
}

/// Read a component's host and port, if both are set.
pub fn lookup_component(env: &EnvVars, name: &str) -> Option<Component> {
    let host = env.get_non_empty(&host_var(name))?;
    let port = env.get_non_empty(&port_var(name))?;
    Some(Component {
        name: name.to_string(),
        host: host.to_string(),
        port: port.to_string(),
    })
}
