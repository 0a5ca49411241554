//! # Storefront Configuration
//!
//! Store identity, currency presentation and tax settings.
//!
//! ## Configuration Sources (Priority Order)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     FULLSTACK_STORE_NAME="Fullstack Rwanda"                            │
//! │     FULLSTACK_TAX_RATE=18                                              │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/fullstack-storefront/storefront.toml (Linux)             │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     USD ($), 2 decimals, 10% tax                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [store]
//! name = "Fullstack"
//! support_email = "hello@fullstack.rw"
//!
//! [currency]
//! code = "USD"
//! symbol = "$"
//! decimals = 2
//!
//! [tax]
//! rate_bps = 1000
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use fullstack_core::{Money, TaxRate, DEFAULT_TAX_RATE_BPS};

use crate::error::{StoreError, StoreResult};

const CONFIG_FILE_NAME: &str = "storefront.toml";
const MAX_CURRENCY_DECIMALS: u8 = 4;

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Shown on order confirmations.
    #[serde(default = "default_store_name")]
    pub name: String,

    #[serde(default = "default_support_email")]
    pub support_email: String,
}

fn default_store_name() -> String {
    "Fullstack".to_string()
}

fn default_support_email() -> String {
    "hello@fullstack.rw".to_string()
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: default_store_name(),
            support_email: default_support_email(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencySettings {
    /// ISO 4217 code.
    #[serde(default = "default_currency_code")]
    pub code: String,

    #[serde(default = "default_currency_symbol")]
    pub symbol: String,

    /// Digits after the decimal point when formatting.
    #[serde(default = "default_currency_decimals")]
    pub decimals: u8,
}

fn default_currency_code() -> String {
    "USD".to_string()
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_currency_decimals() -> u8 {
    2
}

impl Default for CurrencySettings {
    fn default() -> Self {
        CurrencySettings {
            code: default_currency_code(),
            symbol: default_currency_symbol(),
            decimals: default_currency_decimals(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxSettings {
    /// Basis points; 1000 = 10%.
    #[serde(default = "default_tax_rate_bps")]
    pub rate_bps: u32,
}

fn default_tax_rate_bps() -> u32 {
    DEFAULT_TAX_RATE_BPS
}

impl Default for TaxSettings {
    fn default() -> Self {
        TaxSettings {
            rate_bps: default_tax_rate_bps(),
        }
    }
}

// =============================================================================
// Storefront Config
// =============================================================================

/// Complete storefront configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub currency: CurrencySettings,

    #[serde(default)]
    pub tax: TaxSettings,
}

impl StorefrontConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`storefront.toml`), if it exists
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load storefront config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a config file without applying environment overrides.
    pub fn from_file(path: &Path) -> StoreResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> StoreResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| StoreError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Storefront config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> StoreResult<()> {
        if self.tax.rate_bps > 10_000 {
            return Err(StoreError::InvalidConfig(format!(
                "tax.rate_bps must be between 0 and 10000, got {}",
                self.tax.rate_bps
            )));
        }

        if self.currency.decimals > MAX_CURRENCY_DECIMALS {
            return Err(StoreError::InvalidConfig(format!(
                "currency.decimals must be at most {}, got {}",
                MAX_CURRENCY_DECIMALS, self.currency.decimals
            )));
        }

        if self.store.name.trim().is_empty() {
            return Err(StoreError::InvalidConfig("store.name must not be empty".into()));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(name) = std::env::var("FULLSTACK_STORE_NAME") {
            self.store.name = name;
        }

        if let Ok(email) = std::env::var("FULLSTACK_SUPPORT_EMAIL") {
            self.store.support_email = email;
        }

        if let Ok(code) = std::env::var("FULLSTACK_CURRENCY_CODE") {
            self.currency.code = code;
        }

        if let Ok(symbol) = std::env::var("FULLSTACK_CURRENCY_SYMBOL") {
            self.currency.symbol = symbol;
        }

        // Percentage, e.g. "18" or "7.5"
        if let Ok(rate) = std::env::var("FULLSTACK_TAX_RATE") {
            match rate.parse::<f64>() {
                Ok(pct) if pct >= 0.0 => {
                    debug!(rate = %rate, "Overriding tax rate from environment");
                    self.tax.rate_bps = TaxRate::from_percentage(pct).bps();
                }
                _ => warn!(rate = %rate, "Ignoring invalid FULLSTACK_TAX_RATE"),
            }
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("rw", "fullstack", "storefront")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax.rate_bps)
    }

    /// Formats an amount for display, e.g. `$51.98`.
    ///
    /// Amounts are held in cents; with more than two display decimals the
    /// extra digits are zero-padded, with fewer the value is rounded half up.
    pub fn format_currency(&self, amount: Money) -> String {
        let decimals = self.currency.decimals as u32;
        let cents = amount.cents();
        let sign = if cents < 0 { "-" } else { "" };
        let abs = cents.unsigned_abs() as u128;

        // Rescale from 2 stored decimals to the configured number; u128 holds
        // i64::MAX cents at any supported precision
        let scaled = if decimals >= 2 {
            abs * 10_u128.pow(decimals - 2)
        } else {
            let divisor = 10_u128.pow(2 - decimals);
            (abs + divisor / 2) / divisor
        };

        let unit = 10_u128.pow(decimals);
        let whole = scaled / unit;

        if decimals == 0 {
            format!("{}{}{}", sign, self.currency.symbol, whole)
        } else {
            format!(
                "{}{}{}.{:0width$}",
                sign,
                self.currency.symbol,
                whole,
                scaled % unit,
                width = decimals as usize
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::default();
        assert_eq!(config.currency.code, "USD");
        assert_eq!(config.tax_rate().bps(), 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_format_currency() {
        let config = StorefrontConfig::default();
        assert_eq!(config.format_currency(Money::from_cents(5198)), "$51.98");
        assert_eq!(config.format_currency(Money::from_cents(1)), "$0.01");
        assert_eq!(config.format_currency(Money::zero()), "$0.00");
        assert_eq!(config.format_currency(Money::from_cents(-1234)), "-$12.34");
    }

    #[test]
    fn test_format_currency_other_precisions() {
        let mut config = StorefrontConfig::default();
        config.currency.symbol = "RWF ".to_string();
        config.currency.decimals = 0;
        assert_eq!(config.format_currency(Money::from_cents(1250)), "RWF 13");
        assert_eq!(config.format_currency(Money::from_cents(1249)), "RWF 12");

        config.currency.decimals = 3;
        assert_eq!(config.format_currency(Money::from_cents(1250)), "RWF 12.500");
    }

    #[test]
    fn test_format_currency_extremes() {
        let mut config = StorefrontConfig::default();
        config.currency.decimals = MAX_CURRENCY_DECIMALS;
        assert_eq!(
            config.format_currency(Money::MAX),
            "$92233720368547758.0700"
        );
        assert_eq!(
            config.format_currency(Money::from_cents(i64::MIN)),
            "-$92233720368547758.0800"
        );

        config.currency.decimals = 0;
        assert_eq!(config.format_currency(Money::MAX), "$92233720368547758");
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: StorefrontConfig = toml::from_str(
            r#"
            [currency]
            symbol = "€"
            code = "EUR"

            [tax]
            rate_bps = 2000
            "#,
        )
        .unwrap();

        assert_eq!(config.currency.symbol, "€");
        assert_eq!(config.currency.decimals, 2);
        assert_eq!(config.tax.rate_bps, 2000);
        assert_eq!(config.store.name, "Fullstack");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = StorefrontConfig::default();
        config.tax.rate_bps = 10_001;
        assert!(matches!(config.validate(), Err(StoreError::InvalidConfig(_))));

        let mut config = StorefrontConfig::default();
        config.currency.decimals = 9;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = std::env::temp_dir().join(format!("fullstack-config-{}", uuid::Uuid::new_v4()));
        let path = dir.join(CONFIG_FILE_NAME);

        let mut config = StorefrontConfig::default();
        config.store.name = "Fullstack Kigali".to_string();
        config.save(Some(path.clone())).unwrap();

        let reloaded = StorefrontConfig::from_file(&path).unwrap();
        assert_eq!(reloaded, config);

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_malformed_file_is_a_load_error() {
        let dir = std::env::temp_dir().join(format!("fullstack-config-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[tax]\nrate_bps = \"lots\"\n").unwrap();

        assert!(matches!(
            StorefrontConfig::from_file(&path),
            Err(StoreError::ConfigLoadFailed(_))
        ));

        std::fs::remove_dir_all(dir).unwrap();
    }
}
