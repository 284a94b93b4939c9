//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment
//!     → env.rs (ordered EnvVars snapshot)
//!     → paths.rs (URL_PREFIX / BACKEND_PATH normalization)
//!     → discovery (linked components, backend selection)
//!     → loader.rs (assembly)
//!     → ResolvedConfig (immutable)
//!     → shared via Arc with the HTTP layer
//! ```
//!
//! # Design Decisions
//! - Config is built once; a changed backend address needs a restart
//! - Resolution reads a snapshot, never the live process environment
//! - Misconfiguration is recorded and logged, not raised

pub mod env;
pub mod loader;
pub mod paths;
pub mod schema;

pub use env::EnvVars;
pub use loader::resolve_config;
pub use schema::{ListenerConfig, ResolvedConfig};
