use std::process::ExitCode;

use anyhow::Result;
use tracing::info;

use crate::channels::build_channel;
use crate::cli::UpdateArgs;
use crate::config::Config;
use crate::validation::{normalize_update, validate_product_update};

use super::{parse_channel, print_failure, print_violations, report_configuration};

pub async fn run(args: &UpdateArgs, verbose: bool, config: &Config) -> Result<ExitCode> {
    let Some(kind) = parse_channel(&args.channel) else {
        return Ok(ExitCode::FAILURE);
    };

    let update = args.to_update();
    if update.is_empty() {
        eprintln!("✗ Nothing to update; pass at least one field");
        return Ok(ExitCode::FAILURE);
    }

    let errors = validate_product_update(&update);
    if !errors.is_empty() {
        print_violations(&errors);
        return Ok(ExitCode::FAILURE);
    }

    let update = normalize_update(update);
    if verbose && let Ok(json) = serde_json::to_string_pretty(&update) {
        println!("{json}");
    }

    if args.dry_run {
        println!("Dry run: listing {} on {kind} would be updated", args.listing_id);
        report_configuration(config, kind);
        return Ok(ExitCode::SUCCESS);
    }

    if let Err(e) = config.require_channel(kind) {
        eprintln!("✗ Configuration error: {e}");
        return Ok(ExitCode::FAILURE);
    }

    let channel = build_channel(kind, config)?;
    info!("Updating listing {} on {}", args.listing_id, channel.name());

    let result = channel.update_listing(&args.listing_id, &update).await;
    if !result.success {
        print_failure(&result);
        return Ok(ExitCode::FAILURE);
    }

    println!("✓ {}", result.message);
    Ok(ExitCode::SUCCESS)
}
