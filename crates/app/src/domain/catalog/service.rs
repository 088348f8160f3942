//! Catalog service.

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Method, RequestBuilder};
use storefront::{
    models::{Category, Product, ProductDetail, Vendor},
    paging::Page,
};

use crate::{
    api::{ApiClient, ApiError},
    domain::catalog::models::ProductQuery,
};

#[derive(Debug, Clone)]
pub struct HttpCatalogService {
    client: ApiClient,
}

impl HttpCatalogService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    fn list_products_request(&self, query: &ProductQuery, page: u32, size: u32) -> RequestBuilder {
        self.client
            .request(Method::GET, "/sale/products")
            .query(&query.params(page, size))
    }

    fn product_request(&self, id: &str) -> RequestBuilder {
        self.client.request_item(Method::GET, "/sale/products", id)
    }
}

#[async_trait]
impl CatalogService for HttpCatalogService {
    async fn list_products(
        &self,
        query: &ProductQuery,
        page: u32,
        size: u32,
    ) -> Result<Page<Product>, ApiError> {
        self.client
            .send(self.list_products_request(query, page, size))
            .await
    }

    async fn get_product(&self, id: &str) -> Result<ProductDetail, ApiError> {
        self.client
            .send(self.product_request(id))
            .await
    }

    async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        self.client
            .send(self.client.request(Method::GET, "/sale/products/categories"))
            .await
    }

    async fn vendors(&self) -> Result<Vec<Vendor>, ApiError> {
        self.client
            .send(self.client.request(Method::GET, "/sale/vendors"))
            .await
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Retrieve one page of products matching `query`.
    async fn list_products(
        &self,
        query: &ProductQuery,
        page: u32,
        size: u32,
    ) -> Result<Page<Product>, ApiError>;

    /// Retrieve a single product with its gallery.
    async fn get_product(&self, id: &str) -> Result<ProductDetail, ApiError>;

    /// Retrieve every product category.
    async fn categories(&self) -> Result<Vec<Category>, ApiError>;

    /// Retrieve every vendor.
    async fn vendors(&self) -> Result<Vec<Vendor>, ApiError>;
}
