//! Common types used across the application.

pub mod money;
pub mod number;

pub use money::{CurrencyCode, InvalidCurrencyCode, Money, format_display, round_for_display};
pub use number::{DecimalInputError, parse_decimal};
