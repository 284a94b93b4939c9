//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use futures_util::stream;
use game_gateway::{resolve_config, EnvVars, GatewayServer, ResolvedConfig, Shutdown};
use tokio::net::TcpListener;

/// Status the echo backend answers with, so relaying can be checked.
pub const ECHO_STATUS: StatusCode = StatusCode::ACCEPTED;

/// Start a backend that echoes what it received as JSON.
pub async fn start_echo_backend() -> SocketAddr {
    let app = Router::new().fallback(echo);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

/// Start a backend whose `/broken` body fails after the first chunk.
/// Every other path echoes like [`start_echo_backend`].
pub async fn start_flaky_backend() -> SocketAddr {
    let app = Router::new().route("/broken", get(broken_body)).fallback(echo);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

async fn broken_body() -> Response {
    let chunks: Vec<Result<Bytes, std::io::Error>> = vec![
        Ok(Bytes::from_static(b"first chunk")),
        Err(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "backend crashed")),
    ];
    Response::builder()
        .status(StatusCode::OK)
        .header("x-backend", "flaky")
        .body(Body::from_stream(stream::iter(chunks)))
        .unwrap()
}

async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> impl IntoResponse {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let payload = serde_json::json!({
        "method": method.as_str(),
        "uri": uri.to_string(),
        "host": header("host"),
        "x_game_id": header("x-game-id"),
        "body": String::from_utf8_lossy(&body),
    });
    (ECHO_STATUS, [("x-backend", "echo")], payload.to_string())
}

/// An address nothing listens on.
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Resolve a config from literal environment pairs.
pub fn config_from(pairs: &[(&str, &str)]) -> ResolvedConfig {
    let env: EnvVars = pairs.iter().copied().collect();
    resolve_config(&env)
}

/// Run a gateway on an ephemeral port; returns its address and shutdown handle.
pub async fn start_gateway(config: ResolvedConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = GatewayServer::new(config).run(listener, server_shutdown).await;
    });
    tokio::time::sleep(Duration::from_millis(50)).await;
    (addr, shutdown)
}

/// Client that bypasses any proxy settings from the environment.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}
