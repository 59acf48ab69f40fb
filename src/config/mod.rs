pub mod toml_config;

use crate::core::matcher::MatchOptions;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{PosError, Result};
use crate::utils::validation::{validate_file_extension, validate_path, Validate};
use std::time::Duration;

#[cfg(feature = "cli")]
use crate::core::export::ExportFormat;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

pub const CATALOG_FILE_EXTENSIONS: &[&str] = &["csv", "json"];
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Resolved catalog location, ready to be opened by an adapter.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogConfig {
    File { path: String },
    Rest(RestCatalogConfig),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RestCatalogConfig {
    pub endpoint: String,
    pub api_key: String,
    pub store_id: String,
    pub timeout: Duration,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "nordia-scan")]
#[command(about = "Scale barcode decoding and product search for Nordia POS")]
pub struct CliConfig {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Product catalog file (.csv or .json); overrides the configured catalog
    #[arg(long)]
    pub catalog: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Print results as JSON")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Decode scanned codes without touching the catalog
    Decode {
        #[arg(required = true)]
        codes: Vec<String>,
    },
    /// Generate a scale label for testing
    Encode {
        #[arg(long)]
        plu: String,
        /// Total price, for a price-embedded label
        #[arg(long, conflicts_with = "weight", required_unless_present = "weight")]
        price: Option<f64>,
        /// Weight in kg, for a weight-embedded label
        #[arg(long)]
        weight: Option<f64>,
    },
    /// Search the catalog the way the sell screen does
    Search { query: String },
    /// Decode a code and resolve it against the catalog
    Scan { code: String },
    /// Write the catalog in a format weighing scales can import
    Export {
        #[arg(long, default_value = "kretz")]
        format: ExportFormat,
        #[arg(long)]
        output: Option<String>,
    },
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Whether the command needs products loaded.
    pub fn needs_catalog(&self) -> bool {
        !matches!(self.command, Command::Decode { .. } | Command::Encode { .. })
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn catalog_config(&self) -> Result<CatalogConfig> {
        self.catalog
            .clone()
            .map(|path| CatalogConfig::File { path })
            .ok_or_else(|| PosError::MissingConfigError {
                field: "--catalog".to_string(),
            })
    }

    fn match_options(&self) -> MatchOptions {
        MatchOptions::default()
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.catalog {
            validate_catalog_path("--catalog", path)?;
        }
        if let Some(path) = &self.config {
            validate_path("--config", path)?;
        }
        Ok(())
    }
}

pub(crate) fn validate_catalog_path(field_name: &str, path: &str) -> Result<()> {
    validate_path(field_name, path)?;
    validate_file_extension(field_name, path, CATALOG_FILE_EXTENSIONS)
}
