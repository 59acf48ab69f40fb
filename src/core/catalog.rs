use crate::core::barcode::{decode, format_plu, is_valid_plu};
use crate::core::matcher::{matches_with, MatchOptions};
use crate::domain::model::{LineItem, Product, ScanOutcome, ScanResult};

/// In-memory product list the sell screen searches and scans against.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    options: MatchOptions,
}

impl Catalog {
    pub fn new(products: Vec<Product>, options: MatchOptions) -> Self {
        let bad_plu = products
            .iter()
            .filter(|p| p.plu.as_deref().is_some_and(|plu| !is_valid_plu(plu)))
            .count();
        if bad_plu > 0 {
            tracing::warn!("{} products have a PLU that scale labels can never match", bad_plu);
        }

        Self { products, options }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn by_plu(&self, plu: &str) -> Option<&Product> {
        self.products
            .iter()
            .find(|p| p.plu.as_deref() == Some(plu))
    }

    pub fn by_barcode(&self, barcode: &str) -> Option<&Product> {
        self.products
            .iter()
            .find(|p| p.barcode.as_deref() == Some(barcode))
    }

    /// Search-box filter: fuzzy name match, or the query appears inside the
    /// PLU or barcode. Keeps catalog order; a blank query yields nothing.
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let found: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| {
                matches_with(query, &p.name, &self.options)
                    || p.plu.as_deref().is_some_and(|plu| plu.contains(query))
                    || p.barcode.as_deref().is_some_and(|code| code.contains(query))
            })
            .collect();

        tracing::debug!(query, hits = found.len(), "catalog search");
        found
    }

    /// Decode a scanned code and turn it into something the cart can use.
    pub fn resolve_scan(&self, code: &str) -> ScanOutcome<'_> {
        match decode(code) {
            ScanResult::BalancePrice { plu, price_total } => match self.by_plu(&plu) {
                Some(product) => {
                    let weight = (product.price > 0.0).then(|| price_total / product.price);
                    ScanOutcome::Line(line_item(product, weight, price_total))
                }
                None => not_found(plu),
            },
            ScanResult::BalanceWeight { plu, weight } => match self.by_plu(&plu) {
                Some(product) => {
                    ScanOutcome::Line(line_item(product, Some(weight), weight * product.price))
                }
                None => not_found(plu),
            },
            ScanResult::Product { barcode } => {
                // Short numeric codes typed by hand are usually a PLU.
                match self
                    .by_barcode(&barcode)
                    .or_else(|| self.by_plu(&format_plu(&barcode)))
                {
                    Some(product) => ScanOutcome::NeedsQuantity(product),
                    None => not_found(barcode),
                }
            }
        }
    }
}

fn line_item(product: &Product, weight: Option<f64>, subtotal: f64) -> LineItem {
    LineItem {
        product_id: product.id.clone(),
        product_name: product.name.clone(),
        unit_price: product.price,
        quantity: 1.0,
        weight,
        subtotal,
    }
}

fn not_found<'a>(key: String) -> ScanOutcome<'a> {
    tracing::warn!(key = %key, "scanned code not in catalog");
    ScanOutcome::NotFound { key }
}
