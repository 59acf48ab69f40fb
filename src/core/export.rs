//! Product lists for loading into weighing scales.

use crate::core::barcode::is_valid_plu;
use crate::domain::model::{Product, Unit};
use crate::utils::error::{PosError, Result};
use serde::Serialize;

const KRETZ_NAME_LEN: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// `PLU|NOMBRE|PRECIO|TIPO`, read by Kretz, Systel and CAS scales.
    Kretz,
    Csv,
}

impl ExportFormat {
    pub fn default_filename(&self) -> &'static str {
        match self {
            ExportFormat::Kretz => "plu_kretz.txt",
            ExportFormat::Csv => "productos.csv",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = PosError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "kretz" => Ok(ExportFormat::Kretz),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(PosError::InvalidInput {
                field: "format".to_string(),
                value: other.to_string(),
                reason: "expected 'kretz' or 'csv'".to_string(),
            }),
        }
    }
}

pub fn export(products: &[Product], format: ExportFormat) -> Result<String> {
    tracing::info!("📦 Exporting {} products as {:?}", products.len(), format);
    match format {
        ExportFormat::Kretz => Ok(export_kretz(products)),
        ExportFormat::Csv => export_csv(products),
    }
}

/// One line per product; weighed items get TIPO 0, everything else 1.
pub fn export_kretz(products: &[Product]) -> String {
    let mut content = String::from("PLU|NOMBRE|PRECIO|TIPO\n");

    for (index, product) in products.iter().enumerate() {
        let plu = match product.plu.as_deref() {
            Some(plu) if is_valid_plu(plu) => plu.trim_start_matches('0').to_string(),
            _ => (index + 1).to_string(),
        };
        let name: String = product
            .name
            .chars()
            .take(KRETZ_NAME_LEN)
            .collect::<String>()
            .to_uppercase();
        let tipo = if product.unit == Unit::Kg { '0' } else { '1' };

        content.push_str(&format!(
            "{:0>3}|{}|{}|{}\n",
            plu,
            name,
            product.price.round() as i64,
            tipo
        ));
    }

    content
}

#[derive(Serialize)]
struct CsvRow<'a> {
    codigo: String,
    nombre: &'a str,
    precio: f64,
    unidad: &'a str,
    categoria: &'a str,
}

pub fn export_csv(products: &[Product]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    for (index, product) in products.iter().enumerate() {
        writer.serialize(CsvRow {
            codigo: format!("{:04}", index + 1),
            nombre: &product.name,
            precio: product.price,
            unidad: product.unit.as_str(),
            categoria: &product.category,
        })?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(e.error().kind(), e.error().to_string()))?;

    String::from_utf8(bytes).map_err(|e| PosError::CatalogError {
        message: format!("export produced invalid UTF-8: {}", e),
    })
}
