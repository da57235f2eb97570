//! # Configuration State
//!
//! Machine settings read from the environment over built-in defaults.

use std::path::PathBuf;

use serde::Serialize;
use vend_core::Money;

/// Tracing filter used when neither `RUST_LOG` nor `VEND_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "warn,vend=info";

/// Application configuration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Shown in the welcome banner
    pub machine_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Password for the admin panel
    #[serde(skip_serializing)]
    pub admin_password: String,

    /// Optional JSON catalog to load instead of the built-in drinks
    pub catalog_path: Option<PathBuf>,

    /// Tracing filter directive used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Name: "Vending Machine Simulator"
    /// - Currency: $
    /// - Admin password: admin123
    /// - Catalog: built-in
    fn default() -> Self {
        ConfigState {
            machine_name: "Vending Machine Simulator".to_string(),
            currency_symbol: "$".to_string(),
            admin_password: "admin123".to_string(),
            catalog_path: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ConfigState {
    /// Creates a new ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `VEND_MACHINE_NAME`: Override the banner name
    /// - `VEND_CURRENCY_SYMBOL`: Override the currency symbol
    /// - `VEND_ADMIN_PASSWORD`: Override the admin password
    /// - `VEND_CATALOG_PATH`: Load the catalog from a JSON file
    /// - `VEND_LOG`: Default tracing filter
    pub fn from_env() -> Self {
        ConfigState::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(name) = var("VEND_MACHINE_NAME") {
            config.machine_name = name;
        }

        if let Some(symbol) = var("VEND_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(password) = var("VEND_ADMIN_PASSWORD") {
            config.admin_password = password;
        }

        if let Some(path) = var("VEND_CATALOG_PATH") {
            config.catalog_path = Some(PathBuf::from(path));
        }

        if let Some(filter) = var("VEND_LOG") {
            config.log_filter = filter;
        }

        config
    }

    /// Formats an amount as a currency string.
    ///
    /// ## Example
    /// ```rust
    /// use vend_cli::state::ConfigState;
    /// use vend_core::Money;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        format!(
            "{}{}{}.{:02}",
            if amount.is_negative() { "-" } else { "" },
            self.currency_symbol,
            amount.dollars().abs(),
            amount.cents_part().abs()
        )
    }
}
