//! Game gateway library.
//!
//! Serves the game's static frontend and forwards API calls under a path
//! prefix to a backend discovered from linked-component environment
//! variables.

pub mod config;
pub mod discovery;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::{resolve_config, EnvVars, ResolvedConfig};
pub use http::GatewayServer;
pub use lifecycle::Shutdown;
