use crate::config::validate_catalog_path;
use crate::domain::model::Product;
use crate::domain::ports::CatalogSource;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Product list exported to a local `.csv` (with header row) or `.json` file.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: String,
}

impl FileCatalog {
    pub fn new(path: String) -> Self {
        Self { path }
    }

    fn is_json(&self) -> bool {
        Path::new(&self.path)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
    }
}

pub fn parse_csv_products(content: &str) -> Result<Vec<Product>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut products = Vec::new();
    for row in reader.deserialize::<Product>() {
        products.push(row?);
    }
    Ok(products)
}

#[async_trait]
impl CatalogSource for FileCatalog {
    async fn load_products(&self) -> Result<Vec<Product>> {
        validate_catalog_path("catalog.path", &self.path)?;

        tracing::debug!("Reading catalog file: {}", self.path);
        let content = tokio::fs::read_to_string(&self.path).await?;

        let products: Vec<Product> = if self.is_json() {
            serde_json::from_str(&content)?
        } else {
            parse_csv_products(&content)?
        };

        tracing::debug!("Parsed {} products from {}", products.len(), self.path);
        Ok(products)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path)
    }
}
