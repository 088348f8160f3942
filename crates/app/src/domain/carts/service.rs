//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Method, RequestBuilder};
use storefront::{
    cart::CartLineId,
    models::{AddToCartRequest, CartItem, CheckoutResponse, OrderItemRequest, SortDirection},
    paging::Page,
};

use crate::api::{ApiClient, ApiError};

#[derive(Debug, Clone)]
pub struct HttpCartsService {
    client: ApiClient,
}

impl HttpCartsService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    fn list_items_request(&self, page: u32, size: u32, direction: SortDirection) -> RequestBuilder {
        self.client.request(Method::GET, "/sale/carts").query(&[
            ("page", page.to_string()),
            ("size", size.to_string()),
            ("direction", direction.as_str().to_string()),
        ])
    }

    fn delete_items_request(&self, ids: &[CartLineId]) -> RequestBuilder {
        let params: Vec<(&str, &str)> = ids.iter().map(|id| ("ids", id.as_str())).collect();

        self.client
            .request(Method::DELETE, "/sale/carts")
            .query(&params)
    }
}

#[async_trait]
impl CartsService for HttpCartsService {
    async fn list_items(
        &self,
        page: u32,
        size: u32,
        direction: SortDirection,
    ) -> Result<Page<CartItem>, ApiError> {
        self.client
            .send(self.list_items_request(page, size, direction))
            .await
    }

    async fn add_item(&self, item: AddToCartRequest) -> Result<String, ApiError> {
        self.client
            .send(self.client.request(Method::POST, "/sale/carts").json(&item))
            .await
    }

    async fn delete_items(&self, ids: Vec<CartLineId>) -> Result<String, ApiError> {
        self.client.send(self.delete_items_request(&ids)).await
    }

    async fn create_order(
        &self,
        items: Vec<OrderItemRequest>,
    ) -> Result<CheckoutResponse, ApiError> {
        self.client
            .send(self.client.request(Method::POST, "/sale/orders").json(&items))
            .await
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve one page of the signed-in user's cart.
    async fn list_items(
        &self,
        page: u32,
        size: u32,
        direction: SortDirection,
    ) -> Result<Page<CartItem>, ApiError>;

    /// Add a product to the cart. Returns the backend's confirmation message.
    async fn add_item(&self, item: AddToCartRequest) -> Result<String, ApiError>;

    /// Delete cart rows. Returns the backend's confirmation message.
    async fn delete_items(&self, ids: Vec<CartLineId>) -> Result<String, ApiError>;

    /// Place an order for the given items and obtain the payment redirect.
    async fn create_order(
        &self,
        items: Vec<OrderItemRequest>,
    ) -> Result<CheckoutResponse, ApiError>;
}
