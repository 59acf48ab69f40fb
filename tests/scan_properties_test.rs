use nordia_scan::core::barcode::format_plu;
use nordia_scan::{decode, encode_balance_price, matches, ScanResult};

#[test]
fn test_price_label() {
    assert_eq!(
        decode("2200001118250"),
        ScanResult::BalancePrice {
            plu: "00001".to_string(),
            price_total: 118.25,
        }
    );
}

#[test]
fn test_weight_label() {
    assert_eq!(
        decode("2100001021500"),
        ScanResult::BalanceWeight {
            plu: "00001".to_string(),
            weight: 2.15,
        }
    );
}

#[test]
fn test_plain_barcode_falls_through() {
    assert_eq!(
        decode("7790895000010"),
        ScanResult::Product {
            barcode: "7790895000010".to_string(),
        }
    );
    assert!(matches!(decode("220000111825"), ScanResult::Product { .. }));
    assert!(matches!(decode(""), ScanResult::Product { barcode } if barcode.is_empty()));
}

#[test]
fn test_encoded_price_labels_decode_back() {
    let plus = [1u32, 7, 42, 1234, 99999];
    let cents = [0u32, 1, 7, 1825, 11825, 50000, 99999];

    for plu in plus {
        for amount in cents {
            let price = f64::from(amount) / 100.0;
            let code = encode_balance_price(&plu.to_string(), price).unwrap();

            assert_eq!(code.len(), 13);
            assert_eq!(
                decode(&code),
                ScanResult::BalancePrice {
                    plu: format_plu(&plu.to_string()),
                    price_total: price,
                },
                "round trip of {}",
                code
            );
        }
    }
}

#[test]
fn test_matcher_examples() {
    assert!(matches("asado", "Asado"));
    assert!(matches("jamon", "Jamón"));
    assert!(matches("azado", "asado"));
    assert!(matches("tmate", "tomate"));
    assert!(matches("pann", "pan"));
    assert!(!matches("xy", "anything-containing-neither"));
    assert!(!matches("pollo", "Asado de Tira"));
}
