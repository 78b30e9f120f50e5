//! One-shot currency conversion route.

use axum::{Json, Router, extract::State, routing::post};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tallykit_core::currency::{
    ConversionRequest, ConversionResult, RateOrigin, round_rate, symbol_for,
};
use tallykit_shared::CurrencyCode;
use tallykit_shared::types::format_display;

use crate::AppState;
use crate::error::ApiResult;
use crate::extract::{ApiJson, text_or_number};

/// Creates the conversion routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/convert", post(convert))
}

/// Request body for `POST /convert`. The amount may be text or a number.
#[derive(Debug, Deserialize)]
pub struct ConvertRequest {
    /// Amount in the source currency.
    #[serde(deserialize_with = "text_or_number")]
    pub amount: String,
    /// Source currency code.
    pub from: String,
    /// Target currency code.
    pub to: String,
}

/// A conversion as sent to clients.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionView {
    /// Amount in the source currency.
    pub amount: Decimal,
    /// Source currency.
    pub from: CurrencyCode,
    /// Target currency.
    pub to: CurrencyCode,
    /// Converted amount at full precision.
    pub converted_amount: Decimal,
    /// Converted amount with symbol, rounded to 2 places.
    pub converted_display: String,
    /// Rate applied (1 from = rate to).
    pub rate: Decimal,
    /// Rate rounded to 4 places.
    pub rate_display: String,
    /// `1 / rate`, absent when the rate is zero.
    pub inverse_rate: Option<Decimal>,
    /// Inverse rate rounded to 4 places.
    pub inverse_rate_display: Option<String>,
    /// Where the rate came from.
    pub origin: RateOrigin,
    /// Publication date of a live rate.
    pub effective_date: Option<NaiveDate>,
    /// Set when the rate is demo data.
    pub notice: Option<&'static str>,
}

impl From<&ConversionResult> for ConversionView {
    fn from(result: &ConversionResult) -> Self {
        let to = result.rate.to_currency.clone();
        Self {
            amount: result.amount,
            from: result.rate.from_currency.clone(),
            converted_amount: result.converted_amount,
            converted_display: format!(
                "{}{}",
                symbol_for(&to),
                format_display(result.converted_amount)
            ),
            rate: result.rate.rate,
            rate_display: format_rate(result.rate.rate),
            inverse_rate: result.inverse_rate(),
            inverse_rate_display: result.inverse_rate().map(format_rate),
            origin: result.origin(),
            effective_date: result.rate.effective_date,
            notice: result.notice(),
            to,
        }
    }
}

/// Formats a rate with 4 decimal places, e.g. `"0.8500"`.
#[must_use]
pub fn format_rate(rate: Decimal) -> String {
    format!("{:.4}", round_rate(rate))
}

/// POST `/convert` - Converts an amount between two currencies.
///
/// Never fails for lack of rates; demo rates are flagged with `notice`.
async fn convert(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ConvertRequest>,
) -> ApiResult<Json<ConversionView>> {
    let request = ConversionRequest::parse(&request.amount, &request.from, &request.to)?;
    let result = state.converter.convert(&request).await?;
    Ok(Json(ConversionView::from(&result)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tallykit_core::currency::ExchangeRate;

    fn code(s: &str) -> CurrencyCode {
        CurrencyCode::parse(s).unwrap()
    }

    #[test]
    fn test_view_formats_amounts_and_rates() {
        let rate = ExchangeRate::new(code("USD"), code("GBP"), dec!(0.73), RateOrigin::Fallback);
        let result = ConversionResult::from_rate(dec!(10), rate).unwrap();

        let view = ConversionView::from(&result);

        assert_eq!(view.converted_amount, dec!(7.30));
        assert_eq!(view.converted_display, "£7.30");
        assert_eq!(view.rate_display, "0.7300");
        assert_eq!(view.inverse_rate_display.as_deref(), Some("1.3699"));
        assert!(view.notice.is_some());
    }

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(dec!(110)), "110.0000");
        assert_eq!(format_rate(dec!(0.853471)), "0.8535");
    }
}
