//! User-facing notices.

use std::fmt::{Display, Formatter, Result as FmtResult};

use storefront::paging::PagingError;

use crate::{
    api::{ApiError, ErrorCategory},
    pages::PageError,
};

/// How a view reacts to the outcome of an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The backend is unreachable; show the maintenance alert.
    Maintenance,

    /// The user must sign in; show the login prompt.
    LoginRequired,

    /// Show an error toast.
    Error(String),

    /// Show a success toast.
    Success(String),

    /// Nothing to show.
    Silent,
}

impl From<&ApiError> for Notice {
    fn from(error: &ApiError) -> Self {
        match error.category() {
            ErrorCategory::Network => Self::Maintenance,
            ErrorCategory::Unauthorized => Self::LoginRequired,
            ErrorCategory::Application => Self::Error(error.to_string()),
        }
    }
}

impl From<&PageError> for Notice {
    fn from(error: &PageError) -> Self {
        match error {
            PageError::Api(error) => error.into(),
            PageError::LoginRequired => Self::LoginRequired,
            // The newer request's outcome is what the user sees.
            PageError::Paging(PagingError::Stale(_) | PagingError::AlreadyLoading(_)) => {
                Self::Silent
            }
            _ => Self::Error(error.to_string()),
        }
    }
}

impl Display for Notice {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Maintenance => f.write_str("The store is unavailable right now, please try again later."),
            Self::LoginRequired => f.write_str("Please sign in to continue."),
            Self::Error(message) | Self::Success(message) => f.write_str(message),
            Self::Silent => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_asks_for_login() {
        let notice = Notice::from(&ApiError::Unauthorized(401));

        assert_eq!(notice, Notice::LoginRequired);
    }

    #[test]
    fn application_error_shows_server_message() {
        let error = ApiError::Application {
            status: 400,
            message: "Product is out of stock".to_string(),
        };

        assert_eq!(
            Notice::from(&error),
            Notice::Error("Product is out of stock".to_string())
        );
    }

    #[test]
    fn stale_page_is_silent() {
        let error = PageError::Paging(PagingError::Stale(2));

        assert_eq!(Notice::from(&error), Notice::Silent);
    }

    #[test]
    fn empty_selection_is_an_error_toast() {
        assert_eq!(
            Notice::from(&PageError::EmptySelection),
            Notice::Error("select at least one item to check out".to_string())
        );
    }
}
