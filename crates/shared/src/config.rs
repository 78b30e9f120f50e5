//! Application configuration management.

use std::time::Duration;

use serde::Deserialize;

/// Application configuration.
///
/// Every section has defaults, so an empty environment yields a usable
/// configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Live exchange-rate source configuration.
    #[serde(default)]
    pub rates: RatesConfig,
    /// Live converter session configuration.
    #[serde(default)]
    pub converter: ConverterConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Live exchange-rate source configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RatesConfig {
    /// Endpoint prefix; the base currency code is appended as the last path segment.
    #[serde(default = "default_rates_base_url")]
    pub base_url: String,
    /// Upper bound for one live lookup, in milliseconds.
    #[serde(default = "default_rates_timeout_ms")]
    pub timeout_ms: u64,
    /// How long a fetched rate table is reused, in seconds.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    /// Maximum number of base currencies kept in the cache.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: u64,
}

impl RatesConfig {
    /// Returns the lookup timeout as a `Duration`.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Returns the cache time-to-live as a `Duration`.
    #[must_use]
    pub const fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            base_url: default_rates_base_url(),
            timeout_ms: default_rates_timeout_ms(),
            cache_ttl_secs: default_cache_ttl_secs(),
            cache_capacity: default_cache_capacity(),
        }
    }
}

fn default_rates_base_url() -> String {
    "https://api.exchangerate-api.com/v4/latest".to_string()
}

fn default_rates_timeout_ms() -> u64 {
    5000
}

fn default_cache_ttl_secs() -> u64 {
    300 // 5 minutes
}

fn default_cache_capacity() -> u64 {
    64
}

/// Live converter session configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ConverterConfig {
    /// Quiet interval after the last edit before a conversion runs, in milliseconds.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl ConverterConfig {
    /// Returns the quiet interval as a `Duration`.
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    500
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("TALLYKIT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(
            config.rates.base_url,
            "https://api.exchangerate-api.com/v4/latest"
        );
        assert_eq!(config.rates.timeout(), Duration::from_secs(5));
        assert_eq!(config.rates.cache_ttl(), Duration::from_secs(300));
        assert_eq!(config.converter.debounce(), Duration::from_millis(500));
    }

    #[test]
    fn test_load_without_sources_uses_defaults() {
        temp_env::with_vars_unset(
            [
                "TALLYKIT__SERVER__PORT",
                "TALLYKIT__RATES__TIMEOUT_MS",
                "TALLYKIT__CONVERTER__DEBOUNCE_MS",
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.server.port, 8080);
                assert_eq!(config.rates.timeout_ms, 5000);
                assert_eq!(config.converter.debounce_ms, 500);
            },
        );
    }

    #[test]
    fn test_load_env_overrides() {
        temp_env::with_vars(
            [
                ("TALLYKIT__SERVER__PORT", Some("9090")),
                ("TALLYKIT__RATES__TIMEOUT_MS", Some("1500")),
                ("TALLYKIT__CONVERTER__DEBOUNCE_MS", Some("250")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.server.port, 9090);
                assert_eq!(config.rates.timeout(), Duration::from_millis(1500));
                assert_eq!(config.converter.debounce(), Duration::from_millis(250));
                // Untouched sections keep their defaults
                assert_eq!(config.rates.cache_ttl_secs, 300);
            },
        );
    }
}
