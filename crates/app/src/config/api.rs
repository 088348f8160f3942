//! Backend API Config

use clap::{Args, ValueEnum};
use rusty_money::iso::{self, Currency};

/// Currency prices are shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CurrencyCode {
    /// Vietnamese dong.
    Vnd,

    /// US dollar.
    Usd,
}

impl CurrencyCode {
    pub fn currency(self) -> &'static Currency {
        match self {
            Self::Vnd => iso::VND,
            Self::Usd => iso::USD,
        }
    }
}

/// Backend connection settings.
#[derive(Debug, Clone, Args)]
pub struct ApiConfig {
    /// Base URL of the storefront backend
    #[arg(long, env = "STOREFRONT_API_URL", default_value = "http://localhost:8222")]
    pub api_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "STOREFRONT_API_TIMEOUT_SECONDS", default_value_t = 10)]
    pub api_timeout_seconds: u64,

    /// Items requested per page
    #[arg(long, env = "STOREFRONT_PAGE_SIZE", default_value_t = 20)]
    pub page_size: u32,

    /// Currency prices are shown in
    #[arg(
        long,
        env = "STOREFRONT_CURRENCY",
        value_enum,
        ignore_case = true,
        default_value_t = CurrencyCode::Vnd
    )]
    pub currency: CurrencyCode,
}
