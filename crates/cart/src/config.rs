//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SHELFCART_STORAGE_DIR` - Directory holding persisted carts (default: .shelfcart)
//! - `SHELFCART_STORAGE_KEY` - Storage key for the cart (default: cart-storage)
//! - `SHELFCART_CURRENCY` - ISO 4217 code used for display (default: USD)

use std::path::PathBuf;

use shelfcart_core::CurrencyCode;
use thiserror::Error;

use crate::storage::validate_key;
use crate::store::DEFAULT_STORAGE_KEY;

const DEFAULT_STORAGE_DIR: &str = ".shelfcart";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Directory for the file-backed store
    pub storage_dir: PathBuf,
    /// Key the cart is persisted under
    pub storage_key: String,
    /// Currency used when formatting prices
    pub currency: CurrencyCode,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            currency: CurrencyCode::default(),
        }
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup` instead of the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage_dir = lookup("SHELFCART_STORAGE_DIR")
            .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR), PathBuf::from);

        let storage_key = get_or_default(&lookup, "SHELFCART_STORAGE_KEY", DEFAULT_STORAGE_KEY);
        validate_key(&storage_key).map_err(|e| {
            ConfigError::InvalidEnvVar("SHELFCART_STORAGE_KEY".to_string(), e.to_string())
        })?;

        let currency = get_or_default(&lookup, "SHELFCART_CURRENCY", "USD")
            .parse::<CurrencyCode>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SHELFCART_CURRENCY".to_string(), e.to_string())
            })?;

        Ok(Self {
            storage_dir,
            storage_key,
            currency,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a variable with a default value.
fn get_or_default<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CartConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, CartConfig::default());
        assert_eq!(config.storage_key, "cart-storage");
        assert_eq!(config.storage_dir, PathBuf::from(".shelfcart"));
        assert_eq!(config.currency, CurrencyCode::USD);
    }

    #[test]
    fn test_overrides() {
        let config = CartConfig::from_lookup(lookup_from(&[
            ("SHELFCART_STORAGE_DIR", "/var/lib/shelfcart"),
            ("SHELFCART_STORAGE_KEY", "guest-cart"),
            ("SHELFCART_CURRENCY", "gbp"),
        ]))
        .unwrap();
        assert_eq!(config.storage_dir, PathBuf::from("/var/lib/shelfcart"));
        assert_eq!(config.storage_key, "guest-cart");
        assert_eq!(config.currency, CurrencyCode::GBP);
    }

    #[test]
    fn test_invalid_key() {
        let err =
            CartConfig::from_lookup(lookup_from(&[("SHELFCART_STORAGE_KEY", "../etc")]))
                .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref var, _) if var == "SHELFCART_STORAGE_KEY"));
    }

    #[test]
    fn test_invalid_currency() {
        let err = CartConfig::from_lookup(lookup_from(&[("SHELFCART_CURRENCY", "DOGE")]))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid environment variable SHELFCART_CURRENCY: unsupported currency code: DOGE"
        );
    }
}
