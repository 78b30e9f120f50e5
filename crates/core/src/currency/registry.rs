//! Currencies offered by the converter.

use once_cell::sync::Lazy;
use serde::Serialize;
use tallykit_shared::CurrencyCode;

/// Display metadata for a convertible currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrencyInfo {
    /// ISO 4217 code.
    pub code: CurrencyCode,
    /// English name.
    pub name: &'static str,
    /// Symbol shown before amounts.
    pub symbol: &'static str,
}

static SUPPORTED: Lazy<Vec<CurrencyInfo>> = Lazy::new(|| {
    [
        ("USD", "US Dollar", "$"),
        ("EUR", "Euro", "€"),
        ("GBP", "British Pound", "£"),
        ("JPY", "Japanese Yen", "¥"),
        ("AUD", "Australian Dollar", "A$"),
        ("CAD", "Canadian Dollar", "C$"),
        ("CHF", "Swiss Franc", "Fr"),
        ("CNY", "Chinese Yuan", "¥"),
        ("SEK", "Swedish Krona", "kr"),
        ("NZD", "New Zealand Dollar", "NZ$"),
        ("MXN", "Mexican Peso", "$"),
        ("SGD", "Singapore Dollar", "S$"),
        ("HKD", "Hong Kong Dollar", "HK$"),
        ("NOK", "Norwegian Krone", "kr"),
        ("INR", "Indian Rupee", "₹"),
        ("BRL", "Brazilian Real", "R$"),
        ("ZAR", "South African Rand", "R"),
        ("KRW", "South Korean Won", "₩"),
    ]
    .into_iter()
    .filter_map(|(code, name, symbol)| {
        CurrencyCode::parse(code)
            .ok()
            .map(|code| CurrencyInfo { code, name, symbol })
    })
    .collect()
});

/// Returns the converter's currency list in picker order.
#[must_use]
pub fn supported_currencies() -> &'static [CurrencyInfo] {
    &SUPPORTED
}

/// Looks up display metadata for a code.
#[must_use]
pub fn currency_info(code: &CurrencyCode) -> Option<&'static CurrencyInfo> {
    SUPPORTED.iter().find(|c| c.code == *code)
}

/// Returns the symbol for a code, or the code itself when unknown.
#[must_use]
pub fn symbol_for(code: &CurrencyCode) -> &str {
    currency_info(code).map_or(code.as_str(), |c| c.symbol)
}
