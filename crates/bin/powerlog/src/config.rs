//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `powerlog.toml` in the working directory (or the file named by
//! `POWERLOG_CONFIG`). Every field has a sensible default so the file is
//! optional. Environment variables take precedence over file values.

use powerlog_domain::period::Period;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Day length and addressable day range.
    pub period: Period,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl LoggingConfig {
    /// Build the subscriber filter from [`LoggingConfig::filter`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] when the directive does not parse.
    pub fn env_filter(&self) -> Result<EnvFilter, ConfigError> {
        EnvFilter::try_new(&self.filter).map_err(|err| {
            ConfigError::Validation(format!("invalid log filter {:?}: {err}", self.filter))
        })
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "powerlog=info,powerlog_app=info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from `powerlog.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("POWERLOG_CONFIG").unwrap_or_else(|_| "powerlog.toml".into());
        let mut config = Self::from_file(&path)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(val) = lookup("POWERLOG_PERIOD_LENGTH") {
            self.period.length = parse_override("POWERLOG_PERIOD_LENGTH", &val)?;
        }
        if let Some(val) = lookup("POWERLOG_LAST_DAY") {
            self.period.last_day = parse_override("POWERLOG_LAST_DAY", &val)?;
        }
        if let Some(val) = lookup("POWERLOG_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = lookup("RUST_LOG") {
            self.logging.filter = val;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.period
            .validate()
            .map_err(|err| ConfigError::Validation(err.to_string()))?;
        self.logging.env_filter()?;
        Ok(())
    }
}

fn parse_override<T: std::str::FromStr>(key: &str, val: &str) -> Result<T, ConfigError> {
    val.trim()
        .parse()
        .map_err(|_| ConfigError::Validation(format!("{key} must be an integer, got {val:?}")))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, val)| ((*key).to_string(), (*val).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.period.length, 1440);
        assert_eq!(config.period.first_day, 1);
        assert_eq!(config.period.last_day, 365);
        assert_eq!(config.logging.filter, "powerlog=info,powerlog_app=info");
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.period.length, 1440);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [period]
            length = 60
            first_day = 2
            last_day = 31

            [logging]
            filter = 'debug'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.period.length, 60);
        assert_eq!(config.period.first_day, 2);
        assert_eq!(config.period.last_day, 31);
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn should_parse_partial_toml_with_defaults() {
        let toml = "
            [period]
            last_day = 31
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.period.last_day, 31);
        assert_eq!(config.period.length, 1440);
        assert_eq!(config.logging.filter, "powerlog=info,powerlog_app=info");
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.period.last_day, 365);
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }

    #[test]
    fn should_apply_environment_overrides() {
        let mut config = Config::default();
        config
            .apply_overrides(env(&[
                ("POWERLOG_PERIOD_LENGTH", "60"),
                ("POWERLOG_LAST_DAY", "30"),
                ("POWERLOG_LOG", "powerlog=debug"),
            ]))
            .unwrap();
        assert_eq!(config.period.length, 60);
        assert_eq!(config.period.last_day, 30);
        assert_eq!(config.logging.filter, "powerlog=debug");
    }

    #[test]
    fn should_prefer_rust_log_over_powerlog_log() {
        let mut config = Config::default();
        config
            .apply_overrides(env(&[("POWERLOG_LOG", "warn"), ("RUST_LOG", "trace")]))
            .unwrap();
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn should_reject_non_numeric_override() {
        let mut config = Config::default();
        let result = config.apply_overrides(env(&[("POWERLOG_PERIOD_LENGTH", "a day")]));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_reject_non_positive_period_length() {
        let mut config = Config::default();
        config.period.length = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_inverted_day_range() {
        let mut config = Config::default();
        config.period.first_day = 10;
        config.period.last_day = 9;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_day_zero_as_first_day() {
        let mut config = Config::default();
        config.period.first_day = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_period_length_that_overflows_last_day() {
        let mut config = Config::default();
        config
            .apply_overrides(env(&[("POWERLOG_PERIOD_LENGTH", "92233720368547758")]))
            .unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_reject_last_day_that_overflows_period_length() {
        let toml = "
            [period]
            length = 4294967296
            last_day = 4294967295
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_reject_unparsable_log_filter() {
        let mut config = Config::default();
        config
            .apply_overrides(env(&[("POWERLOG_LOG", "powerlog=loud")]))
            .unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
        assert!(config.logging.env_filter().is_err());
    }

    #[test]
    fn should_accept_default_configuration() {
        assert!(Config::default().validate().is_ok());
    }
}
