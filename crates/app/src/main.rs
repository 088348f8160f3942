//! Storefront CLI

use std::process;

use clap::Parser;
use storefront_app::observability;

mod cli;

#[tokio::main]
#[expect(clippy::print_stderr, reason = "command failures are reported on stderr")]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = cli::Cli::parse();

    let result = match observability::init(cli.logging()) {
        Ok(()) => cli.run().await,
        Err(error) => Err(error.to_string()),
    };

    if let Err(error) = result {
        eprintln!("{error}");
        process::exit(1);
    }
}
