//! # shelf-admin
//!
//! Operator commands around the admin drafts.
//!
//! ## Usage
//! ```bash
//! # Recompute a stored sale's total from its line items
//! shelf-admin sale ./sale.json
//!
//! # Validate a product draft (--with-file: an image file is selected)
//! shelf-admin product ./product.json --with-file
//!
//! # List the categories and manufacturers the backend offers
//! shelf-admin options
//! ```
//!
//! Exit code 0 when the command succeeded and the input was valid, 1
//! otherwise. Set `SHELF_CONFIG` / `SHELF_API_BASE_URL` to point at another
//! backend.

use std::env;
use std::process::ExitCode;

use shelf_admin::{init_tracing, AdminError, AdminResult};
use shelf_client::{CatalogApi, ClientConfig, HttpCatalogApi};
use shelf_core::{finalize, CoreError, ProductFormData, SaleDraft, SizeList, SubmittedSale};
use tracing::{error, info};

const USAGE: &str = "\
Usage: shelf-admin <command>

Commands:
  sale <file.json>                  Recompute the total of a stored sale
  product <file.json> [--with-file] Validate a product draft
  options                           List categories and manufacturers
  help                              Show this help message";

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    let config = ClientConfig::load_or_default(None);

    let outcome = match args.first().map(String::as_str) {
        Some("sale") => match args.get(1) {
            Some(path) => run_sale(path, &config),
            None => Err(AdminError::Usage(USAGE.to_string())),
        },
        Some("product") => match args.get(1) {
            Some(path) => {
                let with_file = args[2..].iter().any(|a| a == "--with-file");
                run_product(path, with_file)
            }
            None => Err(AdminError::Usage(USAGE.to_string())),
        },
        Some("options") => run_options(config).await,
        Some("help") | Some("--help") | Some("-h") => {
            println!("{USAGE}");
            Ok(true)
        }
        _ => Err(AdminError::Usage(USAGE.to_string())),
    };

    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(AdminError::Usage(usage)) => {
            eprintln!("{usage}");
            ExitCode::FAILURE
        }
        Err(err) => {
            error!(error = %err, "Command failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn read_input(path: &str) -> AdminResult<String> {
    std::fs::read_to_string(path).map_err(|source| AdminError::ReadInput {
        path: path.to_string(),
        source,
    })
}

/// Prints the stored and the recomputed total. Always a success once the
/// file parses; a mismatch is information, not an error.
fn run_sale(path: &str, config: &ClientConfig) -> AdminResult<bool> {
    let sale: SubmittedSale = serde_json::from_str(&read_input(path)?)?;
    let stored = sale.total_amount;
    let draft = SaleDraft::new(sale);
    let sale = draft.sale();

    println!(
        "Sale {} by {} ({}, {} item(s))",
        sale.short_id(),
        sale.submitted_by(),
        sale.payment_method,
        sale.items.len()
    );
    for (i, item) in draft.items().iter().enumerate() {
        println!(
            "  {:>2}. {:<30} {}",
            i + 1,
            item.title.as_deref().unwrap_or("-"),
            config.format_currency(item.line_total())
        );
    }
    println!("Stored total:     {}", config.format_currency(stored));
    println!("Recomputed total: {}", config.format_currency(draft.total()));

    if stored != draft.total() {
        info!(
            sale_id = %sale.id,
            stored = %stored,
            recomputed = %draft.total(),
            "Stored sale total differs from its line items"
        );
    }
    Ok(true)
}

/// Validates a product draft against the size list it carries.
fn run_product(path: &str, with_file: bool) -> AdminResult<bool> {
    let draft: ProductFormData = serde_json::from_str(&read_input(path)?)?;
    let sizes = SizeList::from_json(&draft.sizes)?;

    match finalize(&draft, &sizes, with_file) {
        Ok(payload) => {
            println!("{}", serde_json::to_string_pretty(&payload)?);
            Ok(true)
        }
        Err(CoreError::InvalidForm(errors)) => {
            for (field, err) in errors.iter() {
                println!("{:<16} {} [{}]", field.as_str(), err, err.code());
            }
            Ok(false)
        }
        Err(other) => Err(other.into()),
    }
}

async fn run_options(config: ClientConfig) -> AdminResult<bool> {
    let api = HttpCatalogApi::new(&config)?;
    let (categories, manufacturers) =
        tokio::try_join!(api.fetch_categories(), api.fetch_manufacturers())?;

    println!("Categories:");
    for c in &categories.items {
        println!("  {:<24} {}", c.id, c.name);
    }
    println!("Manufacturers:");
    for m in &manufacturers {
        println!("  {:<24} {}", m.id, m.name);
    }
    Ok(true)
}
