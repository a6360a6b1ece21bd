//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::AppResult;
use crate::types::amount::{DEFAULT_SCALE, DEFAULT_TOLERANCE, Tolerance};

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Settlement engine configuration.
    #[serde(default)]
    pub engine: EngineConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settlement engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Amounts below this are treated as zero.
    #[serde(default = "default_tolerance")]
    pub tolerance: Decimal,
    /// Decimal places used when allocating split amounts.
    #[serde(default = "default_scale")]
    pub scale: u32,
}

fn default_tolerance() -> Decimal {
    DEFAULT_TOLERANCE
}

fn default_scale() -> u32 {
    DEFAULT_SCALE
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            scale: default_scale(),
        }
    }
}

impl EngineConfig {
    /// Returns the validated tolerance.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the configured tolerance is not positive.
    pub fn tolerance(&self) -> AppResult<Tolerance> {
        Ok(Tolerance::new(self.tolerance)?)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default `tracing` filter directive, used when `RUST_LOG` is unset.
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Emit JSON log lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_filter() -> String {
    "divvy=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones overriding earlier ones: `config/default`,
    /// `config/{RUN_MODE}`, then `DIVVY__SECTION__KEY` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("DIVVY").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults_without_sources() {
        temp_env::with_vars_unset(
            [
                "DIVVY__ENGINE__TOLERANCE",
                "DIVVY__ENGINE__SCALE",
                "DIVVY__LOGGING__FILTER",
                "DIVVY__LOGGING__JSON",
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.engine.tolerance, dec!(0.01));
                assert_eq!(config.engine.scale, 2);
                assert_eq!(config.logging.filter, "divvy=info");
                assert!(!config.logging.json);
            },
        );
    }

    #[test]
    fn test_environment_overrides() {
        temp_env::with_vars(
            [
                ("DIVVY__ENGINE__TOLERANCE", Some("0.05")),
                ("DIVVY__ENGINE__SCALE", Some("3")),
                ("DIVVY__LOGGING__JSON", Some("true")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.engine.tolerance, dec!(0.05));
                assert_eq!(config.engine.scale, 3);
                assert!(config.logging.json);
                assert_eq!(config.engine.tolerance().unwrap().value(), dec!(0.05));
            },
        );
    }

    #[test]
    fn test_non_positive_tolerance_is_config_error() {
        let engine = EngineConfig {
            tolerance: dec!(0),
            scale: 2,
        };
        let err = engine.tolerance().unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }
}
