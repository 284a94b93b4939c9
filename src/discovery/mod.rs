//! Linked backend discovery.
//!
//! # Data Flow
//! ```text
//! EnvVars snapshot
//!     → components.rs (COMPONENT_<NAME>_HOST / _PORT pairs)
//!     → selection.rs (BACKEND_SERVICE > BACKEND_COMPONENT_NAME > first)
//!     → BackendSelection (host:port or Unresolved)
//! ```
//!
//! # Design Decisions
//! - Never fails: an unresolved backend is a value, not an error
//! - Discovery order is the snapshot order
//! - Runs once at startup; address changes need a restart

pub mod components;
pub mod selection;

pub use components::{find_components, lookup_component, Component};
pub use selection::{select_backend, BackendSelection};
