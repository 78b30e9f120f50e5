//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST routes for the cash counter, tax calculator and currency converter
//! - A WebSocket endpoint for live, debounced conversion
//! - JSON error responses built from `AppError`

pub mod error;
pub mod extract;
pub mod routes;

use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tallykit_core::currency::CurrencyConverter;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Converter backed by the live source and the fallback table.
    pub converter: Arc<CurrencyConverter>,
    /// Quiet period for live conversion sessions.
    pub debounce: Duration,
}

impl AppState {
    /// Creates the shared state.
    #[must_use]
    pub fn new(converter: CurrencyConverter, debounce: Duration) -> Self {
        Self {
            converter: Arc::new(converter),
            debounce,
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
