mod fetcher;
mod models;
mod parser;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const API_BASE: &str = "https://world.openfoodfacts.org/api/v0/product";

/// Characters that may not appear raw in a URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'%');

/// Look up a product in the Open Food Facts database.
#[derive(Parser)]
#[command(name = "foodfacts_lookup", version)]
struct Cli {
    /// Product identifier (barcode) to look up
    product_id: String,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(API_BASE, &cli.product_id) {
        Ok(product) => {
            println!("Product name: {}", product.name);
            println!("Product image: {}", product.image_url);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(api_base: &str, product_id: &str) -> Result<models::Product> {
    let url = product_url(api_base, product_id);
    debug!(%url, "fetching product record");
    let body = fetcher::fetch(&url)?;
    let product = parser::interpret(&body)?;
    Ok(product)
}

fn product_url(api_base: &str, product_id: &str) -> String {
    // The identifier comes straight from the command line; encode it so it
    // cannot alter the request path.
    let encoded = utf8_percent_encode(product_id, PATH_SEGMENT);
    format!("{api_base}/{encoded}.json")
}
