//! Core calculation engine for Tallykit.
//!
//! This crate contains the pure calculation logic with no web dependencies.
//! All money values are `rust_decimal::Decimal`; rounding happens only for
//! display.
//!
//! # Modules
//!
//! - `denomination` - Cash counting over a bill and coin catalog
//! - `tax` - Tax-exclusive and tax-inclusive sales tax
//! - `currency` - Currency conversion with live and fallback rates

pub mod currency;
pub mod denomination;
pub mod tax;
