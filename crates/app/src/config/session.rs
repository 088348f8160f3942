//! Session Config

use clap::Args;
use storefront::session::{Session, UserInfo};

/// Credentials of an already signed-in user.
#[derive(Debug, Clone, Args)]
pub struct SessionConfig {
    /// Access token issued by the identity provider
    #[arg(long, env = "STOREFRONT_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Subject id of the signed-in user
    #[arg(long, env = "STOREFRONT_USER_ID")]
    pub user_id: Option<String>,
}

impl SessionConfig {
    /// The configured session, when both token and user id are present.
    pub fn session(&self) -> Option<Session> {
        let token = self.access_token.as_deref().map(str::trim)?;
        let user_id = self.user_id.as_deref().map(str::trim)?;

        if token.is_empty() || user_id.is_empty() {
            return None;
        }

        Some(Session::new(
            token,
            UserInfo {
                sub: user_id.to_string(),
                ..UserInfo::default()
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_needs_token_and_user() {
        let config = SessionConfig {
            access_token: Some("token".to_string()),
            user_id: None,
        };

        assert!(config.session().is_none());
    }

    #[test]
    fn blank_token_is_no_session() {
        let config = SessionConfig {
            access_token: Some("  ".to_string()),
            user_id: Some("user-1".to_string()),
        };

        assert!(config.session().is_none());
    }

    #[test]
    fn complete_credentials_build_session() {
        let config = SessionConfig {
            access_token: Some("token".to_string()),
            user_id: Some("user-1".to_string()),
        };

        assert_eq!(
            config.session().map(|session| session.user_id().to_string()),
            Some("user-1".to_string())
        );
    }
}
