//! Runtime configuration.

use std::path::PathBuf;

use clap::Args;
use rusty_money::iso::{self, Currency};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The currency code is not one the storefront prices in.
    #[error("unknown currency: {0}")]
    UnknownCurrency(String),
}

/// Global options shared by every subcommand.
#[derive(Debug, Clone, Args)]
pub struct ConfigArgs {
    /// Directory holding the persisted cart
    #[arg(long, global = true, env = "STOREFRONT_DATA_DIR", default_value = ".storefront")]
    pub data_dir: PathBuf,

    /// Base URL of the order API
    #[arg(
        long,
        global = true,
        env = "STOREFRONT_API_URL",
        default_value = "http://localhost:1337"
    )]
    pub api_url: String,

    /// Catalog snapshot to look products up in
    #[arg(long, global = true, env = "STOREFRONT_CATALOG", default_value = "catalog.yaml")]
    pub catalog: PathBuf,

    /// Currency prices are displayed in (EUR, GBP or USD)
    #[arg(long, global = true, env = "STOREFRONT_CURRENCY", default_value = "EUR")]
    pub currency: String,
}

/// Resolved configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Storage directory
    pub data_dir: PathBuf,

    /// Order API base URL, without a trailing slash
    pub api_url: String,

    /// Catalog snapshot path
    pub catalog: PathBuf,

    /// Display currency
    pub currency: &'static Currency,
}

impl TryFrom<ConfigArgs> for AppConfig {
    type Error = ConfigError;

    fn try_from(args: ConfigArgs) -> Result<Self, Self::Error> {
        Ok(Self {
            data_dir: args.data_dir,
            api_url: args.api_url.trim_end_matches('/').to_string(),
            catalog: args.catalog,
            currency: parse_currency(&args.currency)?,
        })
    }
}

/// Map a currency code to its ISO currency.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownCurrency`] for anything other than EUR, GBP
/// or USD.
pub fn parse_currency(code: &str) -> Result<&'static Currency, ConfigError> {
    match code.trim().to_ascii_uppercase().as_str() {
        "EUR" => Ok(iso::EUR),
        "GBP" => Ok(iso::GBP),
        "USD" => Ok(iso::USD),
        _ => Err(ConfigError::UnknownCurrency(code.to_string())),
    }
}
