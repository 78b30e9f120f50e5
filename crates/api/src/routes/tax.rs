//! Tax calculator routes.

use axum::{
    Json, Router,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tallykit_core::tax::{
    TaxBreakdown, TaxMode, TaxPreset, TaxResult, common_tax_rates, compute_tax, parse_input,
};
use tallykit_shared::types::format_display;

use crate::AppState;
use crate::error::ApiResult;
use crate::extract::{ApiJson, text_or_number};

/// Creates the tax routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tax", post(calculate_tax))
        .route("/tax/presets", get(list_presets))
}

/// Request body for `POST /tax`. Price and rate are field text or numbers.
#[derive(Debug, Deserialize)]
pub struct TaxRequest {
    /// Entered price.
    #[serde(deserialize_with = "text_or_number")]
    pub price: String,
    /// Rate in percent.
    #[serde(deserialize_with = "text_or_number")]
    pub rate: String,
    /// `exclusive` (default) or `inclusive`.
    #[serde(default)]
    pub mode: TaxMode,
}

/// Response for `POST /tax`.
#[derive(Debug, Serialize)]
pub struct TaxResponse {
    /// Mode used.
    pub mode: TaxMode,
    /// Full-precision amounts.
    pub result: TaxResult,
    /// Amounts rounded to 2 places.
    pub display: TaxDisplay,
    /// Rate figures.
    pub breakdown: TaxBreakdown,
}

/// Display strings for a tax result.
#[derive(Debug, Serialize)]
pub struct TaxDisplay {
    /// Pre-tax amount.
    pub pre_tax: String,
    /// Tax amount.
    pub tax: String,
    /// Post-tax amount.
    pub post_tax: String,
}

impl From<&TaxResult> for TaxDisplay {
    fn from(result: &TaxResult) -> Self {
        Self {
            pre_tax: format_display(result.pre_tax),
            tax: format_display(result.tax),
            post_tax: format_display(result.post_tax),
        }
    }
}

/// GET `/tax/presets` - Common tax rates.
async fn list_presets() -> Json<&'static [TaxPreset]> {
    Json(common_tax_rates())
}

/// POST `/tax` - Computes pre-tax, tax and post-tax amounts.
async fn calculate_tax(ApiJson(request): ApiJson<TaxRequest>) -> ApiResult<Json<TaxResponse>> {
    let input = parse_input(&request.price, &request.rate, request.mode)?;
    let result = compute_tax(input.price, input.rate, input.mode)?;
    tracing::debug!(mode = %input.mode, rate = %input.rate, "Computed tax");

    Ok(Json(TaxResponse {
        mode: input.mode,
        display: TaxDisplay::from(&result),
        breakdown: TaxBreakdown::for_rate(input.rate),
        result,
    }))
}
