use anyhow::Context;
use clap::Parser;
use nordia_scan::config::{CatalogConfig, Command};
use nordia_scan::core::barcode::{decode, encode_balance_price, encode_balance_weight};
use nordia_scan::core::export::export;
use nordia_scan::domain::ports::ConfigProvider;
use nordia_scan::utils::error::{ErrorSeverity, PosError};
use nordia_scan::utils::{logger, validation::Validate};
use nordia_scan::{load_catalog, open_catalog, Catalog, CliConfig, MatchOptions, ScanOutcome, ScanResult, TomlConfig};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let file_config = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => None,
    };

    let level = file_config.as_ref().and_then(|c| c.log_level());
    if file_config.as_ref().is_some_and(|c| c.json_logs()) {
        logger::init_json_logger(cli.verbose, level);
    } else {
        logger::init_cli_logger(cli.verbose, level);
    }

    tracing::debug!("CLI config: {:?}", cli);

    let validation = cli
        .validate()
        .and_then(|_| file_config.as_ref().map_or(Ok(()), |c| c.validate()));
    if let Err(e) = validation {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Some(name) = file_config.as_ref().and_then(|c| c.store_name()) {
        tracing::info!("🏪 Store: {}", name);
    }

    if let Err(e) = run(&cli, file_config.as_ref()).await {
        std::process::exit(report(&e));
    }
}

async fn run(cli: &CliConfig, file_config: Option<&TomlConfig>) -> anyhow::Result<()> {
    match &cli.command {
        Command::Decode { codes } => {
            for code in codes {
                let result = decode(code);
                if cli.json {
                    println!("{}", serde_json::to_string(&result)?);
                } else {
                    println!("{}", describe_scan(&result));
                }
            }
        }
        Command::Encode { plu, price, weight } => {
            let code = match (price, weight) {
                (Some(price), _) => encode_balance_price(plu, *price)?,
                (None, Some(weight)) => encode_balance_weight(plu, *weight)?,
                (None, None) => {
                    return Err(PosError::InvalidInput {
                        field: "amount".to_string(),
                        value: String::new(),
                        reason: "pass --price or --weight".to_string(),
                    }
                    .into())
                }
            };
            println!("{}", code);
        }
        Command::Search { query } => {
            let catalog = open_configured_catalog(cli, file_config).await?;
            let hits = catalog.search(query);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&hits)?);
            } else if hits.is_empty() {
                println!("No products match '{}'", query);
            } else {
                for product in hits {
                    println!(
                        "{:<5} {:<30} ${:>10.2}/{}",
                        product.plu.as_deref().unwrap_or("-"),
                        product.name,
                        product.price,
                        product.unit.as_str()
                    );
                }
            }
        }
        Command::Scan { code } => {
            let catalog = open_configured_catalog(cli, file_config).await?;
            print_outcome(&catalog.resolve_scan(code), cli.json)?;
        }
        Command::Export { format, output } => {
            let catalog = open_configured_catalog(cli, file_config).await?;
            let content = export(catalog.products(), *format)?;
            let path = output
                .clone()
                .unwrap_or_else(|| format.default_filename().to_string());
            std::fs::write(&path, content).with_context(|| format!("writing export to {}", path))?;
            tracing::info!("📁 Export saved to: {}", path);
            println!("📁 Export saved to: {}", path);
        }
    }

    Ok(())
}

async fn open_configured_catalog(cli: &CliConfig, file_config: Option<&TomlConfig>) -> anyhow::Result<Catalog> {
    // --catalog on the command line wins over the configured source.
    let (config, options): (CatalogConfig, MatchOptions) = match file_config {
        Some(file) if cli.catalog.is_none() => (file.catalog_config()?, file.match_options()),
        Some(file) => (cli.catalog_config()?, file.match_options()),
        None => (cli.catalog_config()?, cli.match_options()),
    };

    let source = open_catalog(&config)?;
    Ok(load_catalog(source.as_ref(), options).await?)
}

fn describe_scan(result: &ScanResult) -> String {
    match result {
        ScanResult::BalancePrice { plu, price_total } => {
            format!("scale price   PLU {}  ${:.2}", plu, price_total)
        }
        ScanResult::BalanceWeight { plu, weight } => {
            format!("scale weight  PLU {}  {:.3}kg", plu, weight)
        }
        ScanResult::Product { barcode } => format!("product       {}", barcode),
    }
}

fn print_outcome(outcome: &ScanOutcome<'_>, json: bool) -> anyhow::Result<()> {
    if json {
        let value = match outcome {
            ScanOutcome::Line(line) => serde_json::json!({ "status": "line", "line": line }),
            ScanOutcome::NeedsQuantity(product) => {
                serde_json::json!({ "status": "needs-quantity", "product": product })
            }
            ScanOutcome::NotFound { key } => serde_json::json!({ "status": "not-found", "key": key }),
        };
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    match outcome {
        ScanOutcome::Line(line) => match line.weight {
            Some(weight) => println!("✓ {} {:.3}kg - ${:.2}", line.product_name, weight, line.subtotal),
            None => println!("✓ {} - ${:.2}", line.product_name, line.subtotal),
        },
        ScanOutcome::NeedsQuantity(product) => {
            let what = if product.unit.is_measured() { "weight" } else { "quantity" };
            println!("✓ {} (${:.2}/{}) - enter {}", product.name, product.price, product.unit.as_str(), what);
        }
        ScanOutcome::NotFound { key } => eprintln!("✗ Product not found: {}", key),
    }
    Ok(())
}

/// Log the failure and pick an exit code from its severity.
fn report(error: &anyhow::Error) -> i32 {
    let Some(e) = error.downcast_ref::<PosError>() else {
        tracing::error!("❌ {:#}", error);
        eprintln!("❌ {:#}", error);
        return 1;
    };

    tracing::error!(
        "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}
