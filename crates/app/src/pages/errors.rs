//! Page controller errors.

use storefront::{
    address::{AddressDraftError, CascadeError},
    cart::CartError,
    money::PriceError,
    paging::PagingError,
};
use thiserror::Error;

use crate::{api::ApiError, identity::IdentityError};

#[derive(Debug, Error)]
pub enum PageError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Paging(#[from] PagingError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Cascade(#[from] CascadeError),

    #[error(transparent)]
    Draft(#[from] AddressDraftError),

    #[error(transparent)]
    Price(#[from] PriceError),

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error("sign in to continue")]
    LoginRequired,

    #[error("select at least one item to check out")]
    EmptySelection,

    #[error("quantity must be at least 1")]
    InvalidQuantity,
}
