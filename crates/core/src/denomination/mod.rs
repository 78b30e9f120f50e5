//! Cash denomination counting.
//!
//! This module implements the money calculator:
//! - Static bill and coin reference data per currency
//! - Count parsing and clamping policy
//! - Total and breakdown calculation
//! - Counter state that resets on currency change

pub mod catalog;
pub mod counter;
pub mod error;

#[cfg(test)]
mod props;

pub use catalog::{CurrencyDenominations, Denomination, DenominationCatalog, DenominationKind};
pub use counter::{
    BreakdownLine, CashCounter, DenominationCounts, DenominationKey, clamp_count, compute_total,
    parse_count, truncate_count,
};
pub use error::DenominationError;
