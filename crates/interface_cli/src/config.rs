//! Preview configuration

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

use core_kernel::Currency;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Preview configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PreviewConfig {
    /// Currency used when the request does not name one
    pub currency: Currency,
    /// Log level
    pub log_level: String,
    /// Log output format
    pub log_format: LogFormat,
    /// Skip batches that expired before the request's `as_of` date
    pub exclude_expired: bool,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            currency: Currency::INR,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            exclude_expired: false,
        }
    }
}

impl PreviewConfig {
    /// Loads configuration from `PHARMACY_*` environment variables
    ///
    /// * `PHARMACY_CURRENCY` - ISO code (default: INR)
    /// * `PHARMACY_LOG_LEVEL` - trace, debug, info, warn, error (default: info)
    /// * `PHARMACY_LOG_FORMAT` - pretty or json (default: pretty)
    /// * `PHARMACY_EXCLUDE_EXPIRED` - true or false (default: false)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(Environment::with_prefix("PHARMACY"))
    }

    /// Loads configuration from the given environment source over defaults
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Config::builder()
            .set_default("currency", defaults.currency.code())?
            .set_default("log_level", defaults.log_level)?
            .set_default("log_format", "pretty")?
            .set_default("exclude_expired", defaults.exclude_expired)?
            .add_source(environment.try_parsing(true))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix("PHARMACY").source(Some(map))
    }

    #[test]
    fn test_defaults_apply_without_variables() {
        let config = PreviewConfig::load(env(&[])).unwrap();
        assert_eq!(config.currency, Currency::INR);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(!config.exclude_expired);
    }

    #[test]
    fn test_variables_override_defaults() {
        let config = PreviewConfig::load(env(&[
            ("PHARMACY_CURRENCY", "AED"),
            ("PHARMACY_LOG_FORMAT", "json"),
            ("PHARMACY_EXCLUDE_EXPIRED", "true"),
        ]))
        .unwrap();

        assert_eq!(config.currency, Currency::AED);
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(config.exclude_expired);
    }

    #[test]
    fn test_unknown_currency_is_an_error() {
        assert!(PreviewConfig::load(env(&[("PHARMACY_CURRENCY", "XYZ")])).is_err());
    }
}
