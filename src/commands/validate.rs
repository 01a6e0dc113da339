use std::process::ExitCode;

use tracing::debug;

use crate::cli::ProductArgs;
use crate::validation::{to_product, validate_product_input};

use super::{print_product, print_violations};

/// Validates the product flags; touches neither the network nor the disk.
pub fn run(args: &ProductArgs, verbose: bool) -> ExitCode {
    let input = args.to_input();
    debug!("Validating product input: {:?}", input);

    let errors = validate_product_input(&input);
    if !errors.is_empty() {
        print_violations(&errors);
        return ExitCode::FAILURE;
    }

    let product = to_product(&input);
    println!("✓ Product is valid");
    print_product(&product, input.images.len(), verbose);

    ExitCode::SUCCESS
}
