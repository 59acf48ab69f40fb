pub mod barcode;
pub mod catalog;
pub mod export;
pub mod matcher;

pub use crate::domain::model::{LineItem, Product, ScanOutcome, ScanResult, Unit};
pub use crate::domain::ports::{CatalogSource, ConfigProvider};
pub use crate::utils::error::Result;
