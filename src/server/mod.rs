//! HTTP API.
//!
//! This module provides:
//! - [`router`]: the axum routes for the calculations API
//! - [`serve`]: bind and serve until Ctrl-C
//!
//! # Routes
//!
//! | Method | Path | Success |
//! |--------|------|---------|
//! | GET | `/calculations/history` | 200, 404 when empty |
//! | GET | `/calculations/{id}` | 200 |
//! | GET | `/calculations/search/{predicate}` | 200, 404 when nothing matches |
//! | POST | `/calculations` | 201 with `Location` |
//! | PUT | `/calculations/{id}` | 200 |
//! | DELETE | `/calculations/{id}` | 204 |
//! | GET | `/health` | 200 |
//!
//! Errors are returned as `application/problem+json` ([`Problem`]), including
//! malformed path IDs and request bodies.

pub mod dto;
pub mod extract;
pub mod handlers;
mod problem;

pub use problem::{Problem, APPLICATION_PROBLEM_JSON};

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Extension, Router};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::error::AppError;
use crate::service::CalculationService;

/// Build the application router around a service.
pub fn router(service: Arc<CalculationService>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/calculations", post(handlers::create))
        .route("/calculations/history", get(handlers::history))
        .route("/calculations/search/{predicate}", get(handlers::search))
        .route(
            "/calculations/{id}",
            get(handlers::get_by_id)
                .put(handlers::update)
                .delete(handlers::delete),
        )
        .layer(Extension(service))
        .layer(TraceLayer::new_for_http())
}

/// Serve the API on `address` until a shutdown signal arrives.
///
/// # Errors
///
/// Returns [`AppError::Server`] if binding or serving fails.
pub async fn serve(address: SocketAddr, service: Arc<CalculationService>) -> Result<(), AppError> {
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|e| AppError::Server {
            message: format!("Failed to bind {address}: {e}"),
        })?;
    info!(%address, "listening");

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Server {
            message: format!("Server failed: {e}"),
        })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
