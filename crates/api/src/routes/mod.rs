//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod convert;
pub mod currencies;
pub mod denominations;
pub mod health;
pub mod live;
pub mod tax;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(denominations::routes())
        .merge(tax::routes())
        .merge(currencies::routes())
        .merge(convert::routes())
        .merge(live::routes())
}
