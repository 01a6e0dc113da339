use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use product_publisher::cli::Cli;
use product_publisher::config::Config;
use product_publisher::{commands, logging};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = Config::from_env();

    match commands::run(cli, &config).await {
        Ok(code) => code,
        Err(e) => {
            error!("Command failed: {:#}", e);
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
