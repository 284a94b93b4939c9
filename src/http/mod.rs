//! HTTP handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, tracing span per request)
//!     → proxy.rs   (under backend_path: forward to backend_host)
//!     → frontend.rs (everything else: static files under frontend_path)
//!     → response streamed back to the client
//! ```

pub mod error;
pub mod frontend;
pub mod proxy;
pub mod request;
pub mod server;

pub use error::ProxyError;
pub use request::RequestId;
pub use server::GatewayServer;
