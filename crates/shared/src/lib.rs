//! Shared types, errors, and configuration for Tallykit.
//!
//! This crate provides common types used across all other crates:
//! - Money and currency code types with decimal precision
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, ConverterConfig, RatesConfig, ServerConfig};
pub use error::{AppError, AppResult};
pub use types::{CurrencyCode, Money};
