//! Wishlist service.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Method;
use storefront::models::WishlistRequest;

use crate::api::{ApiClient, ApiError};

#[derive(Debug, Clone)]
pub struct HttpWishlistService {
    client: ApiClient,
}

impl HttpWishlistService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl WishlistService for HttpWishlistService {
    async fn add_product(&self, product_id: String) -> Result<String, ApiError> {
        self.client
            .send(
                self.client
                    .request(Method::POST, "/sale/wishlist")
                    .json(&WishlistRequest { product_id }),
            )
            .await
    }
}

#[automock]
#[async_trait]
pub trait WishlistService: Send + Sync {
    /// Save a product to the wishlist. Returns the backend's confirmation message.
    async fn add_product(&self, product_id: String) -> Result<String, ApiError>;
}
