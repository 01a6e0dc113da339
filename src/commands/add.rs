use std::process::ExitCode;

use anyhow::Result;
use tracing::{info, warn};

use crate::channels::build_channel;
use crate::cli::ProductArgs;
use crate::config::Config;
use crate::validation::{to_product, validate_product_input};

use super::{parse_channel, print_failure, print_product, print_violations, report_configuration};

pub async fn run(
    args: &ProductArgs,
    channel_name: &str,
    dry_run: bool,
    verbose: bool,
    config: &Config,
) -> Result<ExitCode> {
    let input = args.to_input();

    let Some(kind) = parse_channel(channel_name) else {
        return Ok(ExitCode::FAILURE);
    };

    let errors = validate_product_input(&input);
    if !errors.is_empty() {
        print_violations(&errors);
        return Ok(ExitCode::FAILURE);
    }

    let product = to_product(&input);

    if dry_run {
        println!("Dry run: \"{}\" would be published to {kind}", product.title);
        print_product(&product, input.images.len(), verbose);
        report_configuration(config, kind);
        return Ok(ExitCode::SUCCESS);
    }

    if let Err(e) = config.require_channel(kind) {
        eprintln!("✗ Configuration error: {e}");
        return Ok(ExitCode::FAILURE);
    }

    let channel = build_channel(kind, config)?;
    info!("Publishing \"{}\" to {}", product.title, channel.name());

    let result = channel.create_listing(&product).await;
    if !result.success {
        print_failure(&result);
        return Ok(ExitCode::FAILURE);
    }

    println!("✓ {}", result.message);
    if let Some(listing_id) = &result.listing_id {
        println!("  Listing ID: {listing_id}");

        if !input.images.is_empty() {
            let images = channel.upload_images(listing_id, &input.images).await;
            if images.success {
                println!("✓ {}", images.message);
            } else {
                // The listing exists either way; image failures are only reported.
                warn!("Image upload for {} failed", listing_id);
                print_failure(&images);
            }
        }
    }

    if verbose {
        print_product(&product, input.images.len(), verbose);
    }

    Ok(ExitCode::SUCCESS)
}
