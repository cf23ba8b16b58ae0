//! Calculator configuration.
//!
//! Loaded from `EMI_*` environment variables or a JSON file, with defaults for
//! anything left unset. Loan input is parsed leniently; configuration is not,
//! and a malformed value is reported as [`CalculatorError::InvalidConfig`].

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::amortization::DEFAULT_PRECISION;
use crate::error::{CalculatorError, CalculatorResult};
use crate::normalize::InputBounds;

/// Largest supported display precision.
pub const MAX_PRECISION: u32 = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Decimal places shown for money amounts (0 = whole currency units).
    pub precision: u32,
    pub currency_symbol: String,
    pub bounds: InputBounds,
    /// Log filter (e.g., `info`, `debug`), used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        CalculatorConfig {
            precision: DEFAULT_PRECISION,
            currency_symbol: "¥".to_string(),
            bounds: InputBounds::default(),
            log_level: "info".to_string(),
        }
    }
}

impl CalculatorConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `EMI_PRECISION`: display decimal places (default: `0`)
    /// - `EMI_CURRENCY_SYMBOL`: currency symbol (default: `¥`)
    /// - `EMI_MAX_PRINCIPAL`: largest accepted principal (default: `10000000000`)
    /// - `EMI_MAX_RATE`: largest accepted annual rate in percent (default: `100`)
    /// - `EMI_MAX_TENURE_MONTHS`: longest accepted tenure (default: `1200`)
    /// - `EMI_LOG_LEVEL`: log filter (default: `info`)
    pub fn from_env() -> CalculatorResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`CalculatorConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> CalculatorResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = CalculatorConfig::default();

        if let Some(value) = lookup("EMI_PRECISION") {
            config.precision = parse_value("EMI_PRECISION", &value)?;
        }
        if let Some(value) = lookup("EMI_CURRENCY_SYMBOL") {
            config.currency_symbol = value;
        }
        if let Some(value) = lookup("EMI_MAX_PRINCIPAL") {
            config.bounds.max_principal = parse_value("EMI_MAX_PRINCIPAL", &value)?;
        }
        if let Some(value) = lookup("EMI_MAX_RATE") {
            config.bounds.max_rate_percent = parse_value("EMI_MAX_RATE", &value)?;
        }
        if let Some(value) = lookup("EMI_MAX_TENURE_MONTHS") {
            config.bounds.max_tenure_months = parse_value("EMI_MAX_TENURE_MONTHS", &value)?;
        }
        if let Some(value) = lookup("EMI_LOG_LEVEL") {
            config.log_level = value;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> CalculatorResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(json: &str) -> CalculatorResult<Self> {
        let config: CalculatorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CalculatorResult<()> {
        if self.precision > MAX_PRECISION {
            return Err(CalculatorError::invalid_config(
                "precision",
                format!("must be at most {MAX_PRECISION}, got {}", self.precision),
            ));
        }
        if self.bounds.max_principal.is_sign_negative() || self.bounds.max_principal.is_zero() {
            return Err(CalculatorError::invalid_config(
                "bounds.max_principal",
                "must be positive",
            ));
        }
        if self.bounds.max_rate_percent.is_sign_negative() {
            return Err(CalculatorError::invalid_config(
                "bounds.max_rate_percent",
                "must not be negative",
            ));
        }
        if self.bounds.max_tenure_months == 0 {
            return Err(CalculatorError::invalid_config(
                "bounds.max_tenure_months",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

fn parse_value<T>(key: &str, value: &str) -> CalculatorResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| CalculatorError::invalid_config(key, format!("'{value}': {e}")))
}
