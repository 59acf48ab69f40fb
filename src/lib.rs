pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::toml_config::TomlConfig;

pub use adapters::{load_catalog, open_catalog, FileCatalog, RestCatalog};
pub use core::barcode::{decode, encode_balance_price, encode_balance_weight};
pub use core::catalog::Catalog;
pub use core::matcher::{matches, matches_with, MatchOptions};
pub use domain::model::{LineItem, Product, ScanOutcome, ScanResult, Unit};
pub use utils::error::{PosError, Result};
