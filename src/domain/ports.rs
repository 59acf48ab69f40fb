use crate::config::CatalogConfig;
use crate::core::matcher::MatchOptions;
use crate::domain::model::Product;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Where the product list comes from.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn load_products(&self) -> Result<Vec<Product>>;

    /// Short label for logs.
    fn describe(&self) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn catalog_config(&self) -> Result<CatalogConfig>;
    fn match_options(&self) -> MatchOptions;
}
