use std::io::{self, Write};

use clap::{Parser, Subcommand};
use storefront_app::{
    config::{ApiConfig, IdentityConfig, LoggingConfig, SessionConfig},
    context::AppContext,
    pages::{Notice, PageError},
};

mod address;
mod cart;
mod catalog;
mod login;
mod payment;
mod wishlist;

#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Storefront CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    api: ApiConfig,

    #[command(flatten)]
    session: SessionConfig,

    #[command(flatten)]
    identity: IdentityConfig,

    #[command(flatten)]
    logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List products
    Products(catalog::ProductsArgs),

    /// Show one product
    Product(catalog::ProductArgs),

    /// List product categories
    Categories,

    /// List vendors
    Vendors,

    Cart(cart::CartCommand),
    Wishlist(wishlist::WishlistCommand),
    Address(address::AddressCommand),
    Payment(payment::PaymentCommand),

    /// Print where to sign in
    LoginUrl,
}

impl Cli {
    pub(crate) fn logging(&self) -> &LoggingConfig {
        &self.logging
    }

    pub(crate) async fn run(self) -> Result<(), String> {
        let context = AppContext::from_config(&self.api, self.session.session())
            .map_err(|error| error.to_string())?;

        let mut out = io::stdout().lock();

        match self.command {
            Commands::Products(args) => catalog::products(&context, args, &mut out).await,
            Commands::Product(args) => catalog::product(&context, args, &mut out).await,
            Commands::Categories => catalog::categories(&context, &mut out).await,
            Commands::Vendors => catalog::vendors(&context, &mut out).await,
            Commands::Cart(command) => cart::run(&context, command, &mut out).await,
            Commands::Wishlist(command) => wishlist::run(&context, command, &mut out).await,
            Commands::Address(command) => address::run(&context, command, &mut out).await,
            Commands::Payment(command) => payment::run(&context, command, &mut out).await,
            Commands::LoginUrl => login::run(&context, self.identity, &mut out),
        }
    }
}

/// What to tell the user about a failed action.
fn failure(error: &PageError) -> String {
    match Notice::from(error) {
        Notice::Silent => error.to_string(),
        notice => notice.to_string(),
    }
}

/// Print a one-line confirmation.
fn confirm(out: &mut impl Write, message: &str) -> Result<(), String> {
    writeln!(out, "{message}").map_err(|error| format!("failed to write output: {error}"))
}
