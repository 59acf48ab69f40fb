use serde::{Deserialize, Serialize};

/// What a scanned or typed code turned out to be.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ScanResult {
    /// Scale label with the total price embedded (prefix `22`).
    BalancePrice { plu: String, price_total: f64 },
    /// Scale label with the net weight in kilograms embedded (prefix `21`).
    BalanceWeight { plu: String, weight: f64 },
    /// Anything else, kept verbatim for a barcode lookup.
    Product { barcode: String },
}

impl ScanResult {
    /// The key the catalog should be searched by.
    pub fn lookup_key(&self) -> &str {
        match self {
            ScanResult::BalancePrice { plu, .. } | ScanResult::BalanceWeight { plu, .. } => plu,
            ScanResult::Product { barcode } => barcode,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Kg,
    Unit,
    Lt,
}

impl Unit {
    /// Sold by measured quantity rather than by piece.
    pub fn is_measured(&self) -> bool {
        matches!(self, Unit::Kg | Unit::Lt)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Kg => "kg",
            Unit::Unit => "unit",
            Unit::Lt => "lt",
        }
    }
}

fn default_category() -> String {
    "General".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub plu: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
    /// Price per unit of measure ($/kg, $/unit, $/lt).
    pub price: f64,
    pub unit: Unit,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub track_stock: bool,
}

/// A cart line built from a scale label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    pub product_id: String,
    pub product_name: String,
    pub unit_price: f64,
    pub quantity: f64,
    pub weight: Option<f64>,
    pub subtotal: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome<'a> {
    /// Scale label: the line is complete and can go straight into the cart.
    Line(LineItem),
    /// Plain barcode: the cashier still has to enter weight or quantity.
    NeedsQuantity(&'a Product),
    NotFound { key: String },
}
