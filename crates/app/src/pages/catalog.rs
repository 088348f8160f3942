//! Catalog page.

use std::sync::Arc;

use smallvec::SmallVec;
use storefront::{
    models::{AddToCartRequest, Category, Product, ProductDetail, Vendor},
    paging::{MergeMode, MergeOutcome, PageAccumulator, PageLink, PageTicket, page_links},
};
use tracing::info;

use crate::{
    domain::{
        carts::CartsService,
        catalog::{CatalogService, models::ProductQuery},
    },
    pages::{PageError, merge_fetch},
};

/// First page number of the product listing.
pub const FIRST_PAGE: u32 = 1;

/// Product listing with filters, paging and add-to-cart.
pub struct CatalogPage {
    catalog: Arc<dyn CatalogService>,
    carts: Arc<dyn CartsService>,
    products: PageAccumulator<Product, ProductQuery>,
    page_size: u32,
    signed_in: bool,
}

impl std::fmt::Debug for CatalogPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogPage")
            .field("products", &self.products)
            .field("page_size", &self.page_size)
            .field("signed_in", &self.signed_in)
            .finish_non_exhaustive()
    }
}

impl CatalogPage {
    pub fn new(
        catalog: Arc<dyn CatalogService>,
        carts: Arc<dyn CartsService>,
        page_size: u32,
        signed_in: bool,
    ) -> Self {
        Self {
            catalog,
            carts,
            products: PageAccumulator::new(ProductQuery::default(), FIRST_PAGE),
            page_size,
            signed_in,
        }
    }

    /// Use `mode` for subsequent pages. Switching modes starts over.
    #[must_use]
    pub fn with_mode(mut self, mode: MergeMode) -> Self {
        self.products.set_mode(mode);
        self
    }

    pub fn query(&self) -> &ProductQuery {
        self.products.context()
    }

    pub fn products(&self) -> &[Product] {
        self.products.items()
    }

    pub fn listing(&self) -> &PageAccumulator<Product, ProductQuery> {
        &self.products
    }

    /// Apply a new filter. A different filter empties the listing.
    pub fn set_query(&mut self, query: ProductQuery) -> bool {
        self.products.set_context(query)
    }

    /// Switch between load-more and numbered paging.
    pub fn set_mode(&mut self, mode: MergeMode) -> bool {
        self.products.set_mode(mode)
    }

    /// Fetch the first page for the current filter.
    pub async fn load_first(&mut self) -> Result<MergeOutcome, PageError> {
        let ticket = self.products.first_request()?;

        self.fetch(ticket).await
    }

    /// Fetch the page after the last one loaded.
    pub async fn load_more(&mut self) -> Result<MergeOutcome, PageError> {
        let ticket = self.products.next_request()?;

        self.fetch(ticket).await
    }

    /// Jump to a page.
    pub async fn go_to(&mut self, page: u32) -> Result<MergeOutcome, PageError> {
        let ticket = self.products.begin_fetch(page)?;

        self.fetch(ticket).await
    }

    async fn fetch(&mut self, ticket: PageTicket<ProductQuery>) -> Result<MergeOutcome, PageError> {
        let fetch = self
            .catalog
            .list_products(ticket.context(), ticket.page(), self.page_size);

        merge_fetch(&mut self.products, &ticket, fetch).await
    }

    /// Numbered links for the pages of the current filter.
    pub fn links(&self) -> SmallVec<[PageLink; 7]> {
        page_links(
            self.products.current_page().unwrap_or(FIRST_PAGE),
            self.products.total_pages(),
        )
    }

    pub async fn product(&self, id: &str) -> Result<ProductDetail, PageError> {
        Ok(self.catalog.get_product(id).await?)
    }

    pub async fn categories(&self) -> Result<Vec<Category>, PageError> {
        Ok(self.catalog.categories().await?)
    }

    pub async fn vendors(&self) -> Result<Vec<Vendor>, PageError> {
        Ok(self.catalog.vendors().await?)
    }

    /// Add a product to the cart. Requires a session.
    pub async fn add_to_cart(&self, product_id: &str, quantity: u32) -> Result<String, PageError> {
        if !self.signed_in {
            return Err(PageError::LoginRequired);
        }

        if quantity == 0 {
            return Err(PageError::InvalidQuantity);
        }

        let message = self
            .carts
            .add_item(AddToCartRequest {
                product_id: product_id.to_string(),
                quantity,
            })
            .await?;

        info!(product_id, quantity, "added product to cart");

        Ok(message)
    }
}
