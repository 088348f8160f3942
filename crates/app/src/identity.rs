//! Identity provider links
//!
//! Sign-in happens entirely at the provider; the storefront only needs to
//! know where to send the user.

use reqwest::Url;
use thiserror::Error;

use crate::config::IdentityConfig;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("identity provider is not configured: {0} is missing")]
    NotConfigured(&'static str),

    #[error("invalid identity provider URL: {0}")]
    InvalidUrl(String),
}

/// OpenID Connect login URL for the configured realm and client.
pub fn login_url(config: &IdentityConfig) -> Result<String, IdentityError> {
    let client_id = required(config.identity_client_id.as_deref(), "IDENTITY_CLIENT_ID")?;

    let url = Url::parse_with_params(
        &realm_endpoint(config, "auth")?,
        &[
            ("client_id", client_id),
            ("redirect_uri", config.identity_redirect_uri.as_str()),
            ("response_type", "code"),
            ("scope", "openid"),
        ],
    )
    .map_err(|error| IdentityError::InvalidUrl(error.to_string()))?;

    Ok(url.into())
}

/// OpenID Connect logout URL returning the user to the redirect URI.
pub fn logout_url(config: &IdentityConfig) -> Result<String, IdentityError> {
    let client_id = required(config.identity_client_id.as_deref(), "IDENTITY_CLIENT_ID")?;

    let url = Url::parse_with_params(
        &realm_endpoint(config, "logout")?,
        &[
            ("client_id", client_id),
            ("post_logout_redirect_uri", config.identity_redirect_uri.as_str()),
        ],
    )
    .map_err(|error| IdentityError::InvalidUrl(error.to_string()))?;

    Ok(url.into())
}

fn realm_endpoint(config: &IdentityConfig, action: &str) -> Result<String, IdentityError> {
    let base = required(config.identity_url.as_deref(), "IDENTITY_URL")?;
    let realm = required(config.identity_realm.as_deref(), "IDENTITY_REALM")?;

    Ok(format!(
        "{}/realms/{realm}/protocol/openid-connect/{action}",
        base.trim_end_matches('/')
    ))
}

fn required<'a>(value: Option<&'a str>, name: &'static str) -> Result<&'a str, IdentityError> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(IdentityError::NotConfigured(name))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::test::identity;

    #[test]
    fn login_url_targets_realm_auth_endpoint() -> TestResult {
        let url = login_url(&identity())?;

        assert_eq!(
            url,
            "https://id.example.com/realms/shop/protocol/openid-connect/auth\
             ?client_id=storefront&redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Fhome\
             &response_type=code&scope=openid"
        );

        Ok(())
    }

    #[test]
    fn logout_url_returns_to_redirect_uri() -> TestResult {
        let url = logout_url(&identity())?;

        assert!(url.contains("/protocol/openid-connect/logout?client_id=storefront"));
        assert!(url.contains("post_logout_redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Fhome"));

        Ok(())
    }

    #[test]
    fn missing_realm_is_reported() {
        let config = IdentityConfig {
            identity_realm: None,
            ..identity()
        };

        assert_eq!(
            login_url(&config),
            Err(IdentityError::NotConfigured("IDENTITY_REALM"))
        );
    }
}
