//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`STOCKDESK_*`)
//! 2. Defaults (this file)
//!
//! Configuration is read-only after initialization.

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::Serialize;
use stockdesk_core::invoice::DEFAULT_INVOICE_WIDTH;
use stockdesk_core::{Currency, Money, DEFAULT_LOW_STOCK_THRESHOLD};
use thiserror::Error;

/// Environment variable names.
pub mod vars {
    pub const STORE_NAME: &str = "STOCKDESK_STORE_NAME";
    pub const CURRENCY_SYMBOL: &str = "STOCKDESK_CURRENCY_SYMBOL";
    pub const LOW_STOCK_THRESHOLD: &str = "STOCKDESK_LOW_STOCK_THRESHOLD";
    pub const INVOICE_DIR: &str = "STOCKDESK_INVOICE_DIR";
    pub const SEED: &str = "STOCKDESK_SEED";
}

/// A configuration value that could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {key}: expected {expected}")]
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Store name (printed under the invoice heading)
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Items below this quantity are flagged in the inventory table
    pub low_stock_threshold: u32,

    /// Where `bill print` writes invoices
    pub invoice_dir: PathBuf,

    /// Width of the plain-text invoice in columns
    pub invoice_width: usize,

    /// Start with the three demo items
    pub seed: bool,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Store: "StockDesk Store"
    /// - Currency: ₹
    /// - Low stock: below 5 units
    /// - Invoices: `<platform data dir>/invoices`
    /// - Seed data: on
    fn default() -> Self {
        ConfigState {
            store_name: "StockDesk Store".to_string(),
            currency_symbol: Currency::default().symbol().to_string(),
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            invoice_dir: default_invoice_dir(),
            invoice_width: DEFAULT_INVOICE_WIDTH,
            seed: true,
        }
    }
}

impl ConfigState {
    /// Creates a new ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `STOCKDESK_STORE_NAME`: Override store name
    /// - `STOCKDESK_CURRENCY_SYMBOL`: Override currency symbol
    /// - `STOCKDESK_LOW_STOCK_THRESHOLD`: Low-stock threshold (e.g., "10")
    /// - `STOCKDESK_INVOICE_DIR`: Directory for printed invoices
    /// - `STOCKDESK_SEED`: `true`/`false`, load the demo items
    pub fn from_env() -> Result<Self, ConfigError> {
        ConfigState::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();

        if let Some(store_name) = lookup(vars::STORE_NAME) {
            if store_name.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: vars::STORE_NAME,
                    value: store_name,
                    expected: "a non-empty name",
                });
            }
            config.store_name = store_name.trim().to_string();
        }

        if let Some(symbol) = lookup(vars::CURRENCY_SYMBOL) {
            config.currency_symbol = symbol;
        }

        if let Some(raw) = lookup(vars::LOW_STOCK_THRESHOLD) {
            config.low_stock_threshold =
                raw.trim()
                    .parse::<u32>()
                    .map_err(|_| ConfigError::InvalidValue {
                        key: vars::LOW_STOCK_THRESHOLD,
                        value: raw.clone(),
                        expected: "a whole number of units",
                    })?;
        }

        if let Some(dir) = lookup(vars::INVOICE_DIR) {
            if dir.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: vars::INVOICE_DIR,
                    value: dir,
                    expected: "a directory path",
                });
            }
            config.invoice_dir = PathBuf::from(dir);
        }

        if let Some(raw) = lookup(vars::SEED) {
            config.seed = parse_flag(&raw).ok_or(ConfigError::InvalidValue {
                key: vars::SEED,
                value: raw.clone(),
                expected: "true or false",
            })?;
        }

        Ok(config)
    }

    pub fn currency(&self) -> Currency {
        Currency::new(self.currency_symbol.clone())
    }

    /// Formats an amount as a currency string with grouping separators.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_major(50_000)), "₹50,000");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        self.currency().format(amount)
    }
}

/// `<platform data dir>/invoices`, or `./invoices` when the platform has no
/// home directory.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.stockdesk.stockdesk/invoices`
/// - **Windows**: `%APPDATA%\stockdesk\stockdesk\data\invoices`
/// - **Linux**: `~/.local/share/stockdesk/invoices`
fn default_invoice_dir() -> PathBuf {
    ProjectDirs::from("com", "stockdesk", "stockdesk")
        .map(|dirs| dirs.data_dir().join("invoices"))
        .unwrap_or_else(|| PathBuf::from("invoices"))
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(pairs: &[(&str, &str)]) -> Result<ConfigState, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ConfigState::from_vars(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_with(&[]).unwrap();
        assert_eq!(config.store_name, "StockDesk Store");
        assert_eq!(config.currency_symbol, "₹");
        assert_eq!(config.low_stock_threshold, 5);
        assert!(config.seed);
        assert!(config.invoice_dir.ends_with("invoices"));
    }

    #[test]
    fn test_overrides() {
        let config = config_with(&[
            (vars::STORE_NAME, "  Corner Shop "),
            (vars::CURRENCY_SYMBOL, "$"),
            (vars::LOW_STOCK_THRESHOLD, "10"),
            (vars::INVOICE_DIR, "/tmp/bills"),
            (vars::SEED, "off"),
        ])
        .unwrap();

        assert_eq!(config.store_name, "Corner Shop");
        assert_eq!(config.currency_symbol, "$");
        assert_eq!(config.low_stock_threshold, 10);
        assert_eq!(config.invoice_dir, PathBuf::from("/tmp/bills"));
        assert!(!config.seed);
    }

    #[test]
    fn test_invalid_values() {
        let err = config_with(&[(vars::LOW_STOCK_THRESHOLD, "few")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: vars::LOW_STOCK_THRESHOLD,
                value: "few".to_string(),
                expected: "a whole number of units",
            }
        );

        assert!(config_with(&[(vars::SEED, "maybe")]).is_err());
        assert!(config_with(&[(vars::STORE_NAME, "   ")]).is_err());
        assert!(config_with(&[(vars::LOW_STOCK_THRESHOLD, "-1")]).is_err());
    }

    #[test]
    fn test_format_currency() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(Money::from_major(50_000)), "₹50,000");
        assert_eq!(config.format_currency(Money::from_minor(1_099)), "₹10.99");

        let dollars = config_with(&[(vars::CURRENCY_SYMBOL, "$")]).unwrap();
        assert_eq!(dollars.format_currency(Money::from_major(-2_500)), "-$2,500");
    }
}
