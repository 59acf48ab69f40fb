use crate::config::RestCatalogConfig;
use crate::domain::model::{Product, Unit};
use crate::domain::ports::CatalogSource;
use crate::utils::error::{PosError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

const PRODUCTS_VIEW: &str = "rest/v1/products_with_stock";

/// Active products of one store, read from the hosted database's REST view.
#[derive(Debug, Clone)]
pub struct RestCatalog {
    client: Client,
    endpoint: String,
    api_key: String,
    store_id: String,
}

/// Row shape of the `products_with_stock` view.
#[derive(Debug, Deserialize)]
struct ProductRow {
    id: String,
    name: String,
    plu: Option<String>,
    barcode: Option<String>,
    price: f64,
    unit: String,
    #[serde(default)]
    track_stock: bool,
    category_name: Option<String>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        let unit = match row.unit.as_str() {
            "kg" => Unit::Kg,
            "lt" => Unit::Lt,
            "unit" => Unit::Unit,
            other => {
                tracing::warn!(product = %row.id, unit = other, "unknown unit, selling per unit");
                Unit::Unit
            }
        };

        Product {
            id: row.id,
            name: row.name,
            plu: row.plu,
            barcode: row.barcode,
            price: row.price,
            unit,
            category: row.category_name.unwrap_or_else(|| "General".to_string()),
            track_stock: row.track_stock,
        }
    }
}

impl RestCatalog {
    pub fn new(config: RestCatalogConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            store_id: config.store_id,
        })
    }

    fn products_url(&self) -> String {
        format!("{}/{}", self.endpoint, PRODUCTS_VIEW)
    }
}

#[async_trait]
impl CatalogSource for RestCatalog {
    async fn load_products(&self) -> Result<Vec<Product>> {
        let url = self.products_url();
        let store_filter = format!("eq.{}", self.store_id);

        tracing::debug!("Requesting catalog from: {}", url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("select", "*"),
                ("store_id", store_filter.as_str()),
                ("active", "eq.true"),
                ("order", "name"),
            ])
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Catalog response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PosError::CatalogError {
                message: format!("{} returned {}: {}", url, status, body),
            });
        }

        let rows: Vec<ProductRow> = response.json().await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    fn describe(&self) -> String {
        format!("rest {} (store {})", self.endpoint, self.store_id)
    }
}
