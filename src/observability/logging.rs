//! Structured logging.
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Log level configurable via `RUST_LOG`, with a crate-level default
//! - Written to stderr so stdout stays free for `--print-config`

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Directives used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_DIRECTIVES: &str = "game_gateway=debug,tower_http=debug";

/// Install the global subscriber. Call once, before anything logs.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_DIRECTIVES.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
