use httpmock::prelude::*;
use nordia_scan::core::export::{export, ExportFormat};
use nordia_scan::domain::ports::ConfigProvider;
use nordia_scan::utils::validation::Validate;
use nordia_scan::{load_catalog, open_catalog, MatchOptions, ScanOutcome, TomlConfig};
use tempfile::TempDir;

const CATALOG_CSV: &str = "\
id,name,plu,barcode,price,unit,category,track_stock
1,Asado de Tira,00001,,5000,kg,Carnes,true
2,Vacío,00002,,6400,kg,Carnes,true
3,Morcilla,00003,,2500,kg,Achuras,false
4,Pan Francés,,7790895000010,1200,unit,Panadería,false
5,Leche Entera 1L,,7791234567890,1100,lt,Lácteos,true
";

#[tokio::test]
async fn test_file_catalog_search_scan_and_export() {
    let temp_dir = TempDir::new().unwrap();
    let catalog_path = temp_dir.path().join("productos.csv");
    std::fs::write(&catalog_path, CATALOG_CSV).unwrap();

    let config_content = format!(
        "[catalog]\ntype = \"file\"\npath = \"{}\"\n",
        catalog_path.to_string_lossy().replace('\\', "/")
    );
    let config = TomlConfig::from_toml_str(&config_content).unwrap();
    config.validate().unwrap();

    let source = open_catalog(&config.catalog_config().unwrap()).unwrap();
    let catalog = load_catalog(source.as_ref(), config.match_options())
        .await
        .unwrap();
    assert_eq!(catalog.len(), 5);

    // Typo tolerant search.
    let hits: Vec<&str> = catalog.search("morcila").iter().map(|p| p.id.as_str()).collect();
    assert_eq!(hits, vec!["3"]);
    let hits: Vec<&str> = catalog.search("vacio").iter().map(|p| p.id.as_str()).collect();
    assert_eq!(hits, vec!["2"]);

    // Weight label for 1.5 kg of vacío.
    match catalog.resolve_scan("2100002015000") {
        ScanOutcome::Line(line) => {
            assert_eq!(line.product_id, "2");
            assert_eq!(line.weight, Some(1.5));
            assert_eq!(line.subtotal, 9600.0);
        }
        other => panic!("unexpected outcome: {:?}", other),
    }

    // Packaged product still needs a quantity.
    assert!(matches!(
        catalog.resolve_scan("7790895000010"),
        ScanOutcome::NeedsQuantity(p) if p.name == "Pan Francés"
    ));

    let kretz = export(catalog.products(), ExportFormat::Kretz).unwrap();
    assert!(kretz.starts_with("PLU|NOMBRE|PRECIO|TIPO\n001|ASADO DE TIRA|5000|0\n"));
    assert!(kretz.contains("|LECHE ENTERA 1L|1100|1\n"));
}

#[tokio::test]
async fn test_rest_catalog_from_toml_config() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/rest/v1/products_with_stock")
            .query_param("store_id", "eq.carniceria-1")
            .header("apikey", "anon-key");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([
                {"id": "a", "name": "Asado", "plu": "00001", "barcode": null, "price": 5500, "unit": "kg", "category_name": "Carnes"},
                {"id": "b", "name": "Chorizo", "plu": "00002", "barcode": null, "price": 3200, "unit": "kg"}
            ]));
    });

    let config_content = format!(
        r#"
[store]
id = "carniceria-1"
name = "Carnicería Central"

[catalog]
type = "rest"
endpoint = "{}"
api_key = "anon-key"
timeout_seconds = 5
"#,
        server.base_url()
    );
    let config = TomlConfig::from_toml_str(&config_content).unwrap();
    config.validate().unwrap();

    let source = open_catalog(&config.catalog_config().unwrap()).unwrap();
    let catalog = load_catalog(source.as_ref(), MatchOptions::default())
        .await
        .unwrap();

    api_mock.assert();
    assert_eq!(catalog.len(), 2);

    match catalog.resolve_scan("2200001118250") {
        ScanOutcome::Line(line) => {
            assert_eq!(line.product_name, "Asado");
            assert_eq!(line.subtotal, 118.25);
            assert!(line.weight.is_some());
        }
        other => panic!("unexpected outcome: {:?}", other),
    }

    assert_eq!(
        catalog.resolve_scan("2200009118250"),
        ScanOutcome::NotFound {
            key: "00009".to_string()
        }
    );
}

#[tokio::test]
async fn test_rest_catalog_failure_is_an_error() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/rest/v1/products_with_stock");
        then.status(500);
    });

    let config_content = format!(
        "[store]\nid = \"s\"\n[catalog]\ntype = \"rest\"\nendpoint = \"{}\"\napi_key = \"k\"\n",
        server.base_url()
    );
    let config = TomlConfig::from_toml_str(&config_content).unwrap();
    let source = open_catalog(&config.catalog_config().unwrap()).unwrap();

    let result = load_catalog(source.as_ref(), config.match_options()).await;

    api_mock.assert();
    assert!(result.is_err());
}
