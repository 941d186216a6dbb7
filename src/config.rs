//! Engine configuration

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

use crate::types::*;

/// Environment variable overriding the statement currency
pub const CURRENCY_ENV: &str = "STATEMENT_CURRENCY";

/// Environment variable overriding the log level
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

/// Settings shared by every parser invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Currency assigned to every extracted statement
    pub default_currency: String,
    /// Institution name used when no "Bank of ..." line is found
    pub fallback_institution: String,
    /// Account holder used when the statement does not name one
    pub fallback_account_holder: String,
    /// Default tracing filter for the binary
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_currency: "USD".to_string(),
            fallback_institution: "Unknown Institution".to_string(),
            fallback_account_holder: "Unknown".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl EngineConfig {
    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(source: &str) -> DocumentResult<Self> {
        toml::from_str(source).map_err(|e| DocumentError::Config(e.to_string()))
    }

    /// Load a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> DocumentResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Apply `STATEMENT_CURRENCY` and `LOG_LEVEL` overrides
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(env::var(CURRENCY_ENV).ok(), env::var(LOG_LEVEL_ENV).ok())
    }

    fn with_overrides(mut self, currency: Option<String>, log_level: Option<String>) -> Self {
        if let Some(currency) = currency.filter(|c| !c.trim().is_empty()) {
            self.default_currency = currency.trim().to_uppercase();
        }
        if let Some(level) = log_level.filter(|l| !l.trim().is_empty()) {
            self.log_level = level.trim().to_lowercase();
        }
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> DocumentResult<()> {
        let currency = &self.default_currency;
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(DocumentError::Config(format!(
                "Currency must be a three-letter ISO code, got '{}'",
                currency
            )));
        }

        if self.fallback_institution.trim().is_empty() {
            return Err(DocumentError::Config(
                "Fallback institution cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
