//! API client errors.

use thiserror::Error;

/// How a failed request should surface to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The backend could not be reached.
    Network,

    /// The session is missing, expired or lacks permission.
    Unauthorized,

    /// The backend rejected the request.
    Application,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("could not reach the storefront API")]
    Network(#[from] reqwest::Error),

    #[error("request was not authorized (status {0})")]
    Unauthorized(u16),

    #[error("{message}")]
    Application { status: u16, message: String },

    #[error("unexpected response body")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Build the error for a failed response, from its status and message.
    pub(crate) fn from_status(status: u16, message: Option<String>) -> Self {
        match status {
            401 | 403 => Self::Unauthorized(status),
            _ => Self::Application {
                status,
                message: message.unwrap_or_else(|| format!("request failed with status {status}")),
            },
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Network(_) => ErrorCategory::Network,
            Self::Unauthorized(_) => ErrorCategory::Unauthorized,
            Self::Application { .. } | Self::Decode(_) => ErrorCategory::Application,
        }
    }
}
