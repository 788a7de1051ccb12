//! HTTP interface (axum).
//!
//! Endpoints:
//!   POST /generate-qr       build a payload and cache it as the latest
//!   GET  /get-latest-qr     raw latest payload for `?id=` (default ID1)
//!   GET  /health            liveness
//!
//! Every route answers cross-origin requests from any origin.

pub mod handlers;

use crate::config::ServerConfig;
use axum::{
    Router,
    routing::{get, post},
};
use handlers::{AppState, generate_handler, health_handler, latest_handler};
use std::future::Future;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

/// Builds the router over a shared service.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/generate-qr", post(generate_handler))
        .route("/get-latest-qr", get(latest_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serves `router` on an already bound listener until `shutdown` resolves.
pub async fn serve_on<F>(listener: TcpListener, router: Router, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!(listen_addr = %addr, "HTTP server listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
}

/// Binds the configured address and serves until Ctrl-C.
pub async fn serve(config: &ServerConfig, state: AppState) -> std::io::Result<()> {
    let listener = TcpListener::bind(config.bind).await?;
    serve_on(listener, router(state), async {
        let _ = tokio::signal::ctrl_c().await;
        info!("Shutdown signal received");
    })
    .await
}
