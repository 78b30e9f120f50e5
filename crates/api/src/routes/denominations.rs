//! Cash counter routes.

use axum::{
    Json, Router,
    extract::Path,
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tallykit_core::denomination::{
    BreakdownLine, CashCounter, CurrencyDenominations, DenominationCatalog, DenominationError,
    DenominationKind,
};
use tallykit_shared::types::format_display;
use tallykit_shared::{AppError, CurrencyCode};

use crate::AppState;
use crate::error::ApiResult;
use crate::extract::ApiJson;

/// Creates the denomination routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/denominations", get(list_denominations))
        .route("/denominations/total", post(count_total))
        .route("/denominations/{code}", get(get_denominations))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// A count as entered: a JSON number, or raw field text.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CountInput {
    /// Whole number; negatives are clamped to zero.
    Integer(i64),
    /// Fractional or very large number; truncated toward zero.
    Fraction(f64),
    /// Field text; only its leading integer is read.
    Text(String),
}

impl CountInput {
    /// Stores this count on `counter`.
    fn apply(
        self,
        counter: &mut CashCounter,
        kind: DenominationKind,
        face_value: Decimal,
    ) -> Result<u64, DenominationError> {
        match self {
            Self::Integer(value) => counter.set_count_value(kind, face_value, value),
            Self::Fraction(value) => counter.set_count_decimal(kind, face_value, fraction(value)),
            Self::Text(raw) => counter.set_count(kind, face_value, &raw),
        }
    }
}

/// Decimal form of a fractional count. Values below one count as zero and
/// values past the decimal range saturate.
fn fraction(value: f64) -> Decimal {
    if value.is_sign_negative() || value < 1.0 {
        return Decimal::ZERO;
    }
    Decimal::try_from(value).unwrap_or(Decimal::MAX)
}

/// One entered count.
#[derive(Debug, Deserialize)]
pub struct CountEntry {
    /// Bill or coin.
    pub kind: DenominationKind,
    /// Face value of the denomination.
    pub face_value: Decimal,
    /// Number of pieces.
    pub count: CountInput,
}

/// Request body for `POST /denominations/total`.
#[derive(Debug, Deserialize)]
pub struct TotalRequest {
    /// Catalog currency code.
    pub currency: String,
    /// Entered counts. Later entries for the same denomination win.
    #[serde(default)]
    pub counts: Vec<CountEntry>,
}

/// Response for `POST /denominations/total`.
#[derive(Debug, Serialize)]
pub struct TotalResponse {
    /// Currency code.
    pub currency: CurrencyCode,
    /// Total at full precision.
    pub total: Decimal,
    /// Total with the currency symbol, e.g. `"$216.07"`.
    pub formatted_total: String,
    /// Non-zero lines in catalog order.
    pub breakdown: Vec<BreakdownView>,
}

/// One line of the breakdown.
#[derive(Debug, Serialize)]
pub struct BreakdownView {
    /// Bill or coin.
    pub kind: DenominationKind,
    /// Face value.
    pub face_value: Decimal,
    /// Display label.
    pub label: String,
    /// Number of pieces.
    pub count: u64,
    /// `count * face_value`.
    pub subtotal: Decimal,
    /// Subtotal rounded for display.
    pub subtotal_display: String,
}

impl From<BreakdownLine> for BreakdownView {
    fn from(line: BreakdownLine) -> Self {
        Self {
            kind: line.denomination.kind,
            face_value: line.denomination.face_value,
            label: line.denomination.label,
            count: line.count,
            subtotal: line.subtotal,
            subtotal_display: format_display(line.subtotal),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET `/denominations` - Every catalog currency with its bills and coins.
async fn list_denominations() -> Json<Vec<&'static CurrencyDenominations>> {
    Json(DenominationCatalog::standard().currencies().collect())
}

/// GET `/denominations/{code}` - One catalog currency.
async fn get_denominations(
    Path(code): Path<String>,
) -> ApiResult<Json<&'static CurrencyDenominations>> {
    let code = parse_code(&code)?;
    let entry = DenominationCatalog::standard()
        .get(&code)
        .ok_or(DenominationError::UnknownCurrency(code))?;
    Ok(Json(entry))
}

/// POST `/denominations/total` - Totals a set of counts.
async fn count_total(ApiJson(request): ApiJson<TotalRequest>) -> ApiResult<Json<TotalResponse>> {
    let code = parse_code(&request.currency)?;
    let mut counter = CashCounter::new(&code)?;

    for entry in request.counts {
        entry.count.apply(&mut counter, entry.kind, entry.face_value)?;
    }

    Ok(Json(TotalResponse {
        currency: code,
        total: counter.total().amount,
        formatted_total: counter.formatted_total(),
        breakdown: counter.breakdown().into_iter().map(Into::into).collect(),
    }))
}

fn parse_code(raw: &str) -> Result<CurrencyCode, AppError> {
    CurrencyCode::parse(raw).map_err(|e| AppError::Validation(e.to_string()))
}
