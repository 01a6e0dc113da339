//! Subcommand orchestration
//!
//! Each command prints its own human-readable output and returns the
//! process exit code. Only unexpected failures surface as `Err`.

use std::process::ExitCode;

use anyhow::Result;

use crate::channels::ChannelKind;
use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::models::{Product, ProductOperationResult};

pub mod add;
pub mod provider;
pub mod update;
pub mod validate;

pub async fn run(cli: Cli, config: &Config) -> Result<ExitCode> {
    let verbose = cli.verbose;
    match cli.command {
        Commands::ValidateProduct(product) => Ok(validate::run(&product, verbose)),
        Commands::AddProduct {
            product,
            channel,
            dry_run,
        } => add::run(&product, &channel, dry_run, verbose, config).await,
        Commands::UpdateProduct(args) => update::run(&args, verbose, config).await,
        Commands::ProviderProducts { id } => provider::run(id, config).await,
    }
}

fn parse_channel(name: &str) -> Option<ChannelKind> {
    match name.parse() {
        Ok(kind) => Some(kind),
        Err(message) => {
            eprintln!("✗ {message}");
            None
        }
    }
}

fn print_violations(errors: &[String]) {
    eprintln!("✗ Validation failed:");
    for error in errors {
        eprintln!("  - {error}");
    }
}

fn print_product(product: &Product, image_count: usize, verbose: bool) {
    println!("  Title:       {}", product.title);
    println!("  Description: {}", product.description);
    println!("  Price:       {:.2}", product.price);
    println!("  Quantity:    {}", product.quantity);
    if !product.tags.is_empty() {
        println!("  Tags:        {}", product.tags.join(", "));
    }
    if !product.materials.is_empty() {
        println!("  Materials:   {}", product.materials.join(", "));
    }
    if image_count > 0 {
        println!("  Images:      {image_count}");
    }

    if verbose && let Ok(json) = serde_json::to_string_pretty(product) {
        println!("{json}");
    }
}

fn print_failure(result: &ProductOperationResult) {
    eprintln!("✗ {}", result.message);
    for error in &result.errors {
        eprintln!("  - {error}");
    }
}

/// Reports configuration presence for a dry run without failing on it.
fn report_configuration(config: &Config, kind: ChannelKind) {
    match config.require_channel(kind) {
        Ok(()) => println!("✓ Channel '{kind}' is configured"),
        Err(e) => println!("⚠ {e}"),
    }
}
