//! Currency conversion with live rates and a static fallback.
//!
//! - [`registry`] - currencies offered by the converter
//! - [`source`] - the live rate source trait
//! - [`converter`] - live, then fallback, then rate 1
//! - [`debounce`] / [`session`] - live-typing conversion with stale-result suppression

pub mod conversion;
pub mod converter;
pub mod debounce;
pub mod exchange;
pub mod fallback;
pub mod registry;
pub mod session;
pub mod source;

#[cfg(test)]
mod props;

pub use conversion::{
    ConversionError, ConversionRequest, ConversionResult, DEMO_RATES_NOTICE, convert_amount,
    parse_amount,
};
pub use converter::{CurrencyConverter, DEFAULT_LOOKUP_TIMEOUT};
pub use debounce::{Debouncer, Ticket};
pub use exchange::{ExchangeRate, RATE_DISPLAY_DECIMAL_PLACES, RateOrigin, round_rate};
pub use fallback::FallbackRates;
pub use registry::{CurrencyInfo, currency_info, supported_currencies, symbol_for};
pub use session::{ConversionSession, DEFAULT_AMOUNT, SessionUpdate};
pub use source::{LatestRates, RateError, RateSource, normalize_rate};
