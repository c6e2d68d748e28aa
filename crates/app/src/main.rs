//! Storefront CLI

use std::process;

use clap::Parser;
use storefront_app::telemetry;

mod cli;

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    if let Err(error) = telemetry::init() {
        eprintln!("{error}");
        process::exit(1);
    }

    let cli = cli::Cli::parse();

    if let Err(error) = cli.run().await {
        eprintln!("{error}");
        process::exit(1);
    }
}
