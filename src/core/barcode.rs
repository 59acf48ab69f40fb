//! Kretz-style weighing-scale barcodes.
//!
//! A scale label is 13 ASCII characters, all digits up to the check digit:
//!
//! | offset | len | field                               |
//! |--------|-----|-------------------------------------|
//! | 0      | 2   | `22` price embedded, `21` weight    |
//! | 2      | 5   | PLU, zero padded                    |
//! | 7      | 5   | price in cents or weight in grams   |
//! | 12     | 1   | check digit (any character)         |
//!
//! Everything else is passed through as a plain product barcode.

use crate::domain::model::ScanResult;
use crate::utils::error::{PosError, Result};

pub const PRICE_PREFIX: &str = "22";
pub const WEIGHT_PREFIX: &str = "21";
pub const SCALE_CODE_LEN: usize = 13;
pub const PLU_LEN: usize = 5;

const AMOUNT_MAX: u32 = 99_999;

/// Classify a scanned code. Never fails: unknown shapes become `ScanResult::Product`.
pub fn decode(raw: &str) -> ScanResult {
    let code = raw.trim();

    if is_scale_code(code) {
        let plu = code[2..7].to_string();
        let amount = digits_value(&code[7..12]);

        if code.starts_with(PRICE_PREFIX) {
            // 11825 -> 118.25
            return ScanResult::BalancePrice {
                plu,
                price_total: f64::from(amount) / 100.0,
            };
        }
        if code.starts_with(WEIGHT_PREFIX) {
            // 02150 -> 2.150 kg
            return ScanResult::BalanceWeight {
                plu,
                weight: f64::from(amount) / 1000.0,
            };
        }
    }

    tracing::trace!(code, "plain product barcode");
    ScanResult::Product {
        barcode: code.to_string(),
    }
}

/// PLU and amount fields must be digits; the check digit may be anything.
fn is_scale_code(code: &str) -> bool {
    let bytes = code.as_bytes();
    bytes.len() == SCALE_CODE_LEN
        && (code.starts_with(PRICE_PREFIX) || code.starts_with(WEIGHT_PREFIX))
        && bytes[2..12].iter().all(u8::is_ascii_digit)
}

/// Caller guarantees ASCII digits only.
fn digits_value(field: &str) -> u32 {
    field
        .bytes()
        .fold(0u32, |acc, b| acc * 10 + u32::from(b - b'0'))
}

/// Mod-10 check digit used when generating labels: digits at even positions
/// weigh 3, odd positions weigh 1.
pub fn check_digit(digits: &str) -> u8 {
    let sum: u32 = digits
        .chars()
        .enumerate()
        .map(|(i, c)| {
            let digit = c.to_digit(10).unwrap_or(0);
            if i % 2 == 0 {
                digit * 3
            } else {
                digit
            }
        })
        .sum();

    ((10 - (sum % 10)) % 10) as u8
}

/// Left-pad a PLU with zeros to five characters.
pub fn format_plu(plu: &str) -> String {
    format!("{:0>width$}", plu, width = PLU_LEN)
}

pub fn is_valid_plu(plu: &str) -> bool {
    plu.len() == PLU_LEN && plu.bytes().all(|b| b.is_ascii_digit())
}

/// Build a price-embedded label, e.g. for test fixtures or printing.
pub fn encode_balance_price(plu: &str, price_total: f64) -> Result<String> {
    let cents = scaled_amount("price", price_total, 100.0)?;
    encode_scale_code(PRICE_PREFIX, plu, cents)
}

/// Build a weight-embedded label from a weight in kilograms.
pub fn encode_balance_weight(plu: &str, weight_kg: f64) -> Result<String> {
    let grams = scaled_amount("weight", weight_kg, 1000.0)?;
    encode_scale_code(WEIGHT_PREFIX, plu, grams)
}

fn scaled_amount(field: &str, value: f64, factor: f64) -> Result<u32> {
    let invalid = |reason: &str| PosError::InvalidInput {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    };

    if !value.is_finite() || value < 0.0 {
        return Err(invalid("must be a non-negative number"));
    }

    let scaled = (value * factor).round();
    if scaled > f64::from(AMOUNT_MAX) {
        return Err(invalid("does not fit in five digits"));
    }

    Ok(scaled as u32)
}

fn encode_scale_code(prefix: &str, plu: &str, amount: u32) -> Result<String> {
    let plu = plu.trim();
    if plu.is_empty() || plu.len() > PLU_LEN || !plu.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PosError::InvalidInput {
            field: "plu".to_string(),
            value: plu.to_string(),
            reason: "PLU must be one to five digits".to_string(),
        });
    }

    let partial = format!("{}{}{:05}", prefix, format_plu(plu), amount);
    let check = check_digit(&partial);

    Ok(format!("{}{}", partial, check))
}
