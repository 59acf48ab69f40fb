// Adapters layer: CatalogSource implementations for external systems.

pub mod file_catalog;
pub mod rest_catalog;

pub use file_catalog::FileCatalog;
pub use rest_catalog::RestCatalog;

use crate::config::CatalogConfig;
use crate::core::catalog::Catalog;
use crate::core::matcher::MatchOptions;
use crate::domain::ports::CatalogSource;
use crate::utils::error::Result;

pub fn open_catalog(config: &CatalogConfig) -> Result<Box<dyn CatalogSource>> {
    match config {
        CatalogConfig::File { path } => Ok(Box::new(FileCatalog::new(path.clone()))),
        CatalogConfig::Rest(rest) => Ok(Box::new(RestCatalog::new(rest.clone())?)),
    }
}

/// Load every product from `source` into a searchable catalog.
pub async fn load_catalog(source: &dyn CatalogSource, options: MatchOptions) -> Result<Catalog> {
    tracing::info!("📥 Loading catalog from {}", source.describe());
    let products = source.load_products().await?;
    tracing::info!("✅ Loaded {} products", products.len());
    Ok(Catalog::new(products, options))
}
