//! Identity Provider Config

use clap::Args;

/// OpenID Connect provider settings.
#[derive(Debug, Clone, Args)]
pub struct IdentityConfig {
    /// Identity provider base URL
    #[arg(long, env = "IDENTITY_URL")]
    pub identity_url: Option<String>,

    /// Realm the storefront's client lives in
    #[arg(long, env = "IDENTITY_REALM")]
    pub identity_realm: Option<String>,

    /// OAuth client id
    #[arg(long, env = "IDENTITY_CLIENT_ID")]
    pub identity_client_id: Option<String>,

    /// Where the provider sends the user back to
    #[arg(long, env = "IDENTITY_REDIRECT_URI", default_value = "http://localhost:3000/home")]
    pub identity_redirect_uri: String,
}
