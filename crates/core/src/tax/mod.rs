//! Sales tax calculation.
//!
//! Forward computation adds tax to a pre-tax price; reverse computation
//! extracts the tax already contained in a price.

pub mod error;
pub mod presets;
pub mod service;
pub mod types;

#[cfg(test)]
mod props;

pub use error::TaxError;
pub use presets::{TaxPreset, common_tax_rates};
pub use service::{compute_tax, compute_tax_from_input, parse_input};
pub use types::{TaxBreakdown, TaxInput, TaxMode, TaxResult};
