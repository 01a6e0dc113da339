use std::process::ExitCode;

use anyhow::Result;

use crate::config::Config;
use crate::models::ProviderProduct;
use crate::providers::PrintfulProvider;
use crate::traits::PrintProvider;

pub async fn run(product_id: Option<u64>, config: &Config) -> Result<ExitCode> {
    if let Err(e) = config.require_printful() {
        eprintln!("✗ Configuration error: {e}");
        return Ok(ExitCode::FAILURE);
    }

    let provider = PrintfulProvider::new(&config.printful)?;

    match product_id {
        Some(id) => match provider.get_product_info(id).await {
            Some(product) => {
                print_line(&product);
                for variant in &product.variants {
                    println!(
                        "    - {} {} {}",
                        variant.id,
                        variant.name,
                        format_price(variant.retail_price)
                    );
                }
                Ok(ExitCode::SUCCESS)
            }
            None => {
                eprintln!("✗ Product {id} not found on {}", provider.name());
                Ok(ExitCode::FAILURE)
            }
        },
        None => {
            let products = provider.get_products().await;
            if products.is_empty() {
                println!("No provider products found");
            }
            for product in &products {
                print_line(product);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn print_line(product: &ProviderProduct) {
    println!(
        "{}  {}  {}  {}",
        product.id,
        product.name,
        format_price(product.price),
        product.thumbnail_url.as_deref().unwrap_or("-")
    );
}

fn format_price(price: Option<f64>) -> String {
    price.map_or_else(|| "-".to_string(), |p| format!("{p:.2}"))
}
