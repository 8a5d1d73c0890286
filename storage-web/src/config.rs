//! Build-time configuration.
//!
//! Values come from the environment (or `.env`, see `build.rs`) when the crate is
//! compiled; nothing is configurable at runtime.

use alloy_primitives::Address;
use shared::error::{AppError, Result};

pub const DEFAULT_CONTRACT_ADDRESS: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
pub const DEFAULT_NATIVE_SYMBOL: &str = "ETH";
pub const DEFAULT_NATIVE_DECIMALS: u8 = 18;
pub const DEFAULT_TOAST_DURATION_MS: u32 = 4000;
pub const DEFAULT_RECEIPT_POLL_INTERVAL_MS: u32 = 1500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub contract_address: String,
    pub native_symbol: String,
    pub native_decimals: u8,
    pub toast_duration_ms: u32,
    pub receipt_poll_interval_ms: u32,
    pub log_level: log::Level,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            contract_address: DEFAULT_CONTRACT_ADDRESS.to_string(),
            native_symbol: DEFAULT_NATIVE_SYMBOL.to_string(),
            native_decimals: DEFAULT_NATIVE_DECIMALS,
            toast_duration_ms: DEFAULT_TOAST_DURATION_MS,
            receipt_poll_interval_ms: DEFAULT_RECEIPT_POLL_INTERVAL_MS,
            log_level: log::Level::Info,
        }
    }
}

impl AppConfig {
    /// Load configuration baked in at compile time.
    pub fn from_env() -> Self {
        Self::from_values(|key| match key {
            "SIMPLE_STORAGE_ADDRESS" => option_env!("SIMPLE_STORAGE_ADDRESS"),
            "NATIVE_SYMBOL" => option_env!("NATIVE_SYMBOL"),
            "NATIVE_DECIMALS" => option_env!("NATIVE_DECIMALS"),
            "TOAST_DURATION_MS" => option_env!("TOAST_DURATION_MS"),
            "RECEIPT_POLL_INTERVAL_MS" => option_env!("RECEIPT_POLL_INTERVAL_MS"),
            "LOG_LEVEL" => option_env!("LOG_LEVEL"),
            _ => None,
        })
    }

    /// Build a config from a key lookup, falling back to defaults for missing or
    /// unparseable values.
    pub fn from_values<'a>(lookup: impl Fn(&str) -> Option<&'a str>) -> Self {
        let defaults = Self::default();
        let parsed = |key: &str| lookup(key).map(str::trim).filter(|v| !v.is_empty());

        Self {
            contract_address: parsed("SIMPLE_STORAGE_ADDRESS")
                .map(str::to_string)
                .unwrap_or(defaults.contract_address),
            native_symbol: parsed("NATIVE_SYMBOL")
                .map(str::to_string)
                .unwrap_or(defaults.native_symbol),
            native_decimals: parsed("NATIVE_DECIMALS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.native_decimals),
            toast_duration_ms: parsed("TOAST_DURATION_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.toast_duration_ms),
            receipt_poll_interval_ms: parsed("RECEIPT_POLL_INTERVAL_MS")
                .and_then(|v| v.parse().ok())
                .filter(|ms| *ms > 0)
                .unwrap_or(defaults.receipt_poll_interval_ms),
            log_level: parsed("LOG_LEVEL")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.log_level),
        }
    }

    /// Parsed contract address.
    pub fn contract_address(&self) -> Result<Address> {
        self.contract_address.parse().map_err(|e| {
            AppError::Config(format!(
                "SIMPLE_STORAGE_ADDRESS {:?} is not an address: {}",
                self.contract_address, e
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::from_values(|_| None);
        assert_eq!(config, AppConfig::default());
        assert_eq!(
            config.contract_address().unwrap().to_string(),
            DEFAULT_CONTRACT_ADDRESS
        );
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_values(|key| match key {
            "NATIVE_SYMBOL" => Some("SepoliaETH"),
            "TOAST_DURATION_MS" => Some("2500"),
            "LOG_LEVEL" => Some("debug"),
            _ => None,
        });
        assert_eq!(config.native_symbol, "SepoliaETH");
        assert_eq!(config.toast_duration_ms, 2500);
        assert_eq!(config.log_level, log::Level::Debug);
        assert_eq!(config.native_decimals, DEFAULT_NATIVE_DECIMALS);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = AppConfig::from_values(|key| match key {
            "NATIVE_DECIMALS" => Some("eighteen"),
            "RECEIPT_POLL_INTERVAL_MS" => Some("0"),
            "LOG_LEVEL" => Some("loud"),
            _ => None,
        });
        assert_eq!(config.native_decimals, DEFAULT_NATIVE_DECIMALS);
        assert_eq!(config.receipt_poll_interval_ms, DEFAULT_RECEIPT_POLL_INTERVAL_MS);
        assert_eq!(config.log_level, log::Level::Info);
    }

    #[test]
    fn test_invalid_contract_address() {
        let config = AppConfig::from_values(|key| match key {
            "SIMPLE_STORAGE_ADDRESS" => Some("0x1234"),
            _ => None,
        });
        assert!(matches!(config.contract_address(), Err(AppError::Config(_))));
    }
}
