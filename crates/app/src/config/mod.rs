//! Storefront configuration
//!
//! Every setting is a CLI flag with an environment fallback; `.env` is read
//! first when present.

mod api;
mod identity;
mod observability;
mod session;

pub use api::{ApiConfig, CurrencyCode};
pub use identity::IdentityConfig;
pub use observability::{LogFormat, LoggingConfig};
pub use session::SessionConfig;
