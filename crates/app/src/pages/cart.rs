//! Cart page.

use std::sync::Arc;

use rusty_money::iso::Currency;
use storefront::{
    cart::{Cart, CartError, CartLineId},
    models::{CheckoutResponse, SortDirection},
    paging::{MergeOutcome, PageTicket},
};
use tracing::{info, warn};

use crate::{
    domain::{carts::CartsService, wishlist::WishlistService},
    pages::PageError,
};

/// The signed-in user's cart, its checkout selection and the actions on it.
pub struct CartPage {
    carts: Arc<dyn CartsService>,
    wishlist: Arc<dyn WishlistService>,
    cart: Cart,
    page_size: u32,
}

impl std::fmt::Debug for CartPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartPage")
            .field("cart", &self.cart)
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

impl CartPage {
    pub fn new(
        carts: Arc<dyn CartsService>,
        wishlist: Arc<dyn WishlistService>,
        currency: &'static Currency,
        page_size: u32,
    ) -> Self {
        Self {
            carts,
            wishlist,
            cart: Cart::new(currency, SortDirection::Desc),
            page_size,
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Selection changes go straight to the cart.
    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    /// Fetch the first page of rows.
    pub async fn load_first(&mut self) -> Result<MergeOutcome, PageError> {
        let ticket = self.cart.first_request()?;

        self.fetch(ticket).await
    }

    /// Fetch the page after the last one loaded.
    pub async fn load_more(&mut self) -> Result<MergeOutcome, PageError> {
        let ticket = self.cart.next_request()?;

        self.fetch(ticket).await
    }

    /// Keep loading until the last page is in. Returns the number of rows loaded.
    pub async fn load_all(&mut self) -> Result<usize, PageError> {
        if self.cart.paging().current_page().is_none() {
            self.load_first().await?;
        }

        while self.cart.paging().has_more() {
            self.load_more().await?;
        }

        Ok(self.cart.lines().len())
    }

    async fn fetch(&mut self, ticket: PageTicket<SortDirection>) -> Result<MergeOutcome, PageError> {
        let result = self
            .carts
            .list_items(ticket.page(), self.page_size, *ticket.context())
            .await;

        match result {
            Ok(page) => Ok(self.cart.merge_page(&ticket, page)?),
            Err(error) => {
                warn!(page = ticket.page(), "cart page fetch failed: {error}");
                self.cart.fail(&ticket, error.to_string())?;

                Err(error.into())
            }
        }
    }

    /// Delete rows remotely, then reload the listing from the first page.
    pub async fn delete(&mut self, ids: Vec<CartLineId>) -> Result<String, PageError> {
        if ids.is_empty() {
            return Err(PageError::EmptySelection);
        }

        let message = self.carts.delete_items(ids.clone()).await?;

        info!(deleted = ids.len(), "deleted cart rows");

        self.cart.remove_lines(&ids);
        self.cart.reload();
        self.load_first().await?;

        Ok(message)
    }

    /// Delete every selected row.
    pub async fn delete_selected(&mut self) -> Result<String, PageError> {
        let ids = self.cart.selected_ids();

        self.delete(ids).await
    }

    /// Save a row's product to the wishlist.
    pub async fn add_to_wishlist(&self, id: &CartLineId) -> Result<String, PageError> {
        let product_id = self
            .cart
            .line(id)
            .map(|line| line.product_id().to_string())
            .ok_or_else(|| CartError::UnknownLine(id.clone()))?;

        Ok(self.wishlist.add_product(product_id).await?)
    }

    /// Order the selection and return where to pay.
    pub async fn checkout(&self) -> Result<CheckoutResponse, PageError> {
        if self.cart.count() == 0 {
            return Err(PageError::EmptySelection);
        }

        let items = self.cart.checkout_items();
        let lines = items.len();
        let response = self.carts.create_order(items).await?;

        info!(lines, "order created, redirecting to payment");

        Ok(response)
    }
}
