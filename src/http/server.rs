//! HTTP server setup.
//!
//! # Responsibilities
//! - Build the Axum router (proxy middleware + frontend fallback)
//! - Wire up tracing middleware
//! - Serve on a listener until shutdown is signalled

use std::sync::Arc;

use axum::middleware;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::ResolvedConfig;
use crate::http::frontend::{frontend_handler, FrontendState};
use crate::http::proxy::{proxy_middleware, ProxyState};
use crate::http::request::make_request_span;

/// HTTP server for the gateway.
pub struct GatewayServer {
    router: Router,
    config: Arc<ResolvedConfig>,
}

impl GatewayServer {
    /// Create a new server for a resolved configuration.
    pub fn new(config: ResolvedConfig) -> Self {
        let config = Arc::new(config);
        let router = Self::build_router(Arc::clone(&config));
        Self { router, config }
    }

    /// The proxy middleware claims `backend_path`; everything else reaches
    /// the static frontend.
    fn build_router(config: Arc<ResolvedConfig>) -> Router {
        let frontend_state = Arc::new(FrontendState::new(&config));

        Router::new()
            .fallback(frontend_handler)
            .with_state(frontend_state)
            .layer(middleware::from_fn_with_state(
                ProxyState::new(config),
                proxy_middleware,
            ))
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
    }

    /// The assembled router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until a shutdown message arrives.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            backend_path = %self.config.backend_path,
            frontend_path = %self.config.frontend_path,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }
}
