//! Router assembly and the serve loop.

use crate::api;
use crate::shutdown::shutdown_signal;
use crate::state::AppState;
use axum::{
    Json, Router,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Serialize;
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Assemble the whole API surface onto one router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Public storefront API
        .nest("/api/catalog", api::catalog::router())
        .nest("/api/cart", api::cart::router())
        .route("/api/checkout", post(api::checkout::checkout))
        .nest("/api/orders", api::orders::router())
        .nest("/api/sellers", api::sellers::router())
        // Payment gateway webhook
        .route("/api/payment/webhook", post(api::payment::payment_webhook))
        // Admin panel API
        .nest("/api/admin", api::admin::router())
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Liveness probe for deploy tooling.
async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Bind and serve until a shutdown signal lands.
pub async fn run_server(router: Router, addr: SocketAddr) -> Result<(), std::io::Error> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}
