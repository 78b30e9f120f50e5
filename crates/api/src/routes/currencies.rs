//! Currency listing routes.

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use tallykit_core::currency::supported_currencies;

use crate::AppState;

/// Creates the currency routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/currencies", get(list_currencies))
}

/// GET `/currencies` - Currencies offered by the converter, in picker order.
async fn list_currencies() -> Json<Value> {
    Json(json!({ "currencies": supported_currencies() }))
}
