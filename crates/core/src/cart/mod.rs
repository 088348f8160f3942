//! Cart
//!
//! The cart keeps the rows loaded from the remote cart, page by page, and
//! the user's checkout selection over them. Each selected row records the
//! unit price and quantity it was selected with, so the subtotal and the
//! checkout payload never depend on which pages happen to be loaded.

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::debug;

use crate::{
    models::{CartItem, OrderItemRequest, SortDirection},
    money::{PriceError, line_total, zero},
    paging::{MergeOutcome, Page, PageAccumulator, PageTicket, PagingError},
};

mod line;

pub use line::{CartLine, CartLineId};

/// Errors raised by cart operations.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// No loaded row has this id.
    #[error("cart line {0} is not loaded")]
    UnknownLine(CartLineId),

    /// Quantities must be at least 1.
    #[error("quantity for cart line {0} must be at least 1")]
    InvalidQuantity(CartLineId),

    /// A row could not be priced.
    #[error(transparent)]
    Price(#[from] PriceError),

    /// A page could not be fetched or merged.
    #[error(transparent)]
    Paging(#[from] PagingError),
}

/// A row chosen for checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedLine {
    /// Product the row refers to.
    pub product_id: String,

    /// Unit price when the row was selected.
    pub unit_price: Money<'static, Currency>,

    /// Quantity to order.
    pub quantity: u32,
}

/// Loaded cart rows plus the checkout selection.
#[derive(Debug)]
pub struct Cart {
    lines: PageAccumulator<CartLine, SortDirection>,
    selection: FxHashMap<CartLineId, SelectedLine>,
    currency: &'static Currency,
}

impl Cart {
    /// First page number of the remote cart listing.
    pub const FIRST_PAGE: u32 = 1;

    /// An empty cart priced in `currency`, listed in `direction`.
    pub fn new(currency: &'static Currency, direction: SortDirection) -> Self {
        Self {
            lines: PageAccumulator::new(direction, Self::FIRST_PAGE),
            selection: FxHashMap::default(),
            currency,
        }
    }

    /// Currency rows are priced in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Loaded rows, in listing order.
    pub fn lines(&self) -> &[CartLine] {
        self.lines.items()
    }

    /// A loaded row.
    pub fn line(&self, id: &CartLineId) -> Option<&CartLine> {
        self.lines.find(id)
    }

    /// Paging state of the row listing.
    pub fn paging(&self) -> &PageAccumulator<CartLine, SortDirection> {
        &self.lines
    }

    /// Request the first page of rows.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Paging`] if that page is already in flight.
    pub fn first_request(&mut self) -> Result<PageTicket<SortDirection>, CartError> {
        Ok(self.lines.first_request()?)
    }

    /// Request the next page of rows.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Paging`] when every page is loaded or the page is in flight.
    pub fn next_request(&mut self) -> Result<PageTicket<SortDirection>, CartError> {
        Ok(self.lines.next_request()?)
    }

    /// Change the listing order. Loaded rows are dropped; the selection is kept.
    pub fn set_direction(&mut self, direction: SortDirection) -> bool {
        self.lines.set_context(direction)
    }

    /// Drop loaded rows so the listing is fetched again from the first page.
    pub fn reload(&mut self) {
        self.lines.reset();
    }

    /// Merge a fetched page of rows.
    ///
    /// Reloaded rows that are selected take back their selected quantity.
    /// Once every page is loaded, selected rows no longer in the listing are
    /// deselected.
    ///
    /// # Errors
    ///
    /// - [`CartError::Price`]: a row's price cannot be represented; the fetch
    ///   is recorded as failed.
    /// - [`CartError::Paging`]: the ticket is stale.
    pub fn merge_page(
        &mut self,
        ticket: &PageTicket<SortDirection>,
        page: Page<CartItem>,
    ) -> Result<MergeOutcome, CartError> {
        let currency = self.currency;
        let page = match page.try_map(|item| CartLine::from_item(item, currency)) {
            Ok(page) => page,
            Err(error) => {
                self.lines.fail(ticket, error.to_string())?;
                return Err(error.into());
            }
        };
        let outcome = self.lines.complete(ticket, page)?;

        for (id, selected) in &self.selection {
            if let Some(line) = self.lines.find_mut(id) {
                line.set_quantity(selected.quantity);
            }
        }

        if !self.lines.has_more() {
            let before = self.selection.len();
            let lines = &self.lines;

            self.selection.retain(|id, _| lines.find(id).is_some());

            let dropped = before - self.selection.len();
            if dropped > 0 {
                debug!(dropped, "deselected rows no longer in the cart");
            }
        }

        Ok(outcome)
    }

    /// Record a failed page fetch; loaded rows stay as they are.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Paging`] if the ticket is stale.
    pub fn fail(
        &mut self,
        ticket: &PageTicket<SortDirection>,
        message: impl Into<String>,
    ) -> Result<(), CartError> {
        Ok(self.lines.fail(ticket, message)?)
    }

    /// Drop rows deleted remotely from both the listing and the selection.
    pub fn remove_lines(&mut self, ids: &[CartLineId]) {
        for id in ids {
            self.lines.remove(id);
            self.selection.remove(id);
        }
    }

    /// Check or uncheck a row. Checking records `quantity` as the row's quantity.
    ///
    /// # Errors
    ///
    /// - [`CartError::UnknownLine`]: no loaded row has this id.
    /// - [`CartError::InvalidQuantity`]: checking with a quantity of 0.
    pub fn select(
        &mut self,
        id: &CartLineId,
        checked: bool,
        quantity: u32,
    ) -> Result<(), CartError> {
        let line = self
            .lines
            .find_mut(id)
            .ok_or_else(|| CartError::UnknownLine(id.clone()))?;

        if !checked {
            self.selection.remove(id);
            return Ok(());
        }

        if !line.set_quantity(quantity) {
            return Err(CartError::InvalidQuantity(id.clone()));
        }

        self.selection.insert(
            id.clone(),
            SelectedLine {
                product_id: line.product_id().to_string(),
                unit_price: line.unit_price(),
                quantity,
            },
        );

        Ok(())
    }

    /// Flip a row's checkbox, restoring its last quantity when re-checked.
    ///
    /// Returns whether the row is now selected.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::UnknownLine`] if no loaded row has this id.
    pub fn toggle(&mut self, id: &CartLineId) -> Result<bool, CartError> {
        let checked = !self.is_selected(id);
        let quantity = self
            .lines
            .find(id)
            .map(CartLine::quantity)
            .ok_or_else(|| CartError::UnknownLine(id.clone()))?;

        self.select(id, checked, quantity)?;

        Ok(checked)
    }

    /// Set a row's quantity, carrying it into the selection if the row is selected.
    ///
    /// # Errors
    ///
    /// - [`CartError::UnknownLine`]: no loaded row has this id.
    /// - [`CartError::InvalidQuantity`]: `quantity` is 0.
    pub fn change_quantity(&mut self, id: &CartLineId, quantity: u32) -> Result<(), CartError> {
        let line = self
            .lines
            .find_mut(id)
            .ok_or_else(|| CartError::UnknownLine(id.clone()))?;

        if !line.set_quantity(quantity) {
            return Err(CartError::InvalidQuantity(id.clone()));
        }

        if let Some(selected) = self.selection.get_mut(id) {
            selected.quantity = quantity;
        }

        Ok(())
    }

    /// Select every loaded row at its current quantity.
    pub fn select_all(&mut self) {
        self.selection = self
            .lines
            .items()
            .iter()
            .map(|line| {
                (
                    line.id().clone(),
                    SelectedLine {
                        product_id: line.product_id().to_string(),
                        unit_price: line.unit_price(),
                        quantity: line.quantity(),
                    },
                )
            })
            .collect();
    }

    /// Clear the selection if every row is selected, otherwise select all.
    pub fn toggle_all(&mut self) {
        if self.all_selected() {
            self.clear();
        } else {
            self.select_all();
        }
    }

    /// Deselect everything.
    pub fn clear(&mut self) {
        self.selection.clear();
    }

    /// Whether a row is selected.
    pub fn is_selected(&self, id: &CartLineId) -> bool {
        self.selection.contains_key(id)
    }

    /// Selection entry for a row.
    pub fn selected(&self, id: &CartLineId) -> Option<&SelectedLine> {
        self.selection.get(id)
    }

    /// Ids of the selected rows, sorted.
    pub fn selected_ids(&self) -> Vec<CartLineId> {
        let mut ids: Vec<CartLineId> = self.selection.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Number of selected rows.
    pub fn count(&self) -> usize {
        self.selection.len()
    }

    /// Whether there are rows and all of them are selected.
    pub fn all_selected(&self) -> bool {
        !self.lines.is_empty()
            && self
                .lines
                .items()
                .iter()
                .all(|line| self.selection.contains_key(line.id()))
    }

    /// Whether some, but not all, rows are selected.
    pub fn some_selected(&self) -> bool {
        !self.selection.is_empty() && !self.all_selected()
    }

    /// Sum of unit price times quantity over the selection.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Price`] if the sum overflows.
    pub fn total(&self) -> Result<Money<'static, Currency>, CartError> {
        let mut minor = 0_i64;

        for selected in self.selection.values() {
            let line = line_total(selected.unit_price, selected.quantity)?;

            minor = minor
                .checked_add(line.to_minor_units())
                .ok_or(PriceError::Overflow)?;
        }

        if minor == 0 {
            return Ok(zero(self.currency));
        }

        Ok(Money::from_minor(minor, self.currency))
    }

    /// Order payload for the selection: loaded rows in listing order, then
    /// any selected rows not currently loaded.
    pub fn checkout_items(&self) -> Vec<OrderItemRequest> {
        let mut items: Vec<OrderItemRequest> = self
            .lines
            .items()
            .iter()
            .filter_map(|line| self.selection.get(line.id()))
            .map(|selected| OrderItemRequest {
                product_id: selected.product_id.clone(),
                quantity: selected.quantity,
            })
            .collect();

        let mut unloaded: Vec<(&CartLineId, &SelectedLine)> = self
            .selection
            .iter()
            .filter(|(id, _)| self.lines.find(id).is_none())
            .collect();

        unloaded.sort_by(|a, b| a.0.cmp(b.0));

        items.extend(unloaded.into_iter().map(|(_, selected)| OrderItemRequest {
            product_id: selected.product_id.clone(),
            quantity: selected.quantity,
        }));

        items
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::iso::{USD, VND};
    use testresult::TestResult;

    use super::*;

    fn item(id: &str, price: Decimal, quantity: u32) -> CartItem {
        CartItem {
            id: id.to_string(),
            in_stock: true,
            product_title: format!("Product {id}"),
            product_id: format!("product-{id}"),
            handle: id.to_string(),
            price,
            quantity,
            image_src: None,
            image_alt: None,
        }
    }

    fn loaded(items: Vec<CartItem>, has_next: bool) -> Result<Cart, CartError> {
        let mut cart = Cart::new(USD, SortDirection::Desc);
        let ticket = cart.first_request()?;

        cart.merge_page(
            &ticket,
            Page {
                has_next,
                ..Page::of(items)
            },
        )?;

        Ok(cart)
    }

    fn id(value: &str) -> CartLineId {
        CartLineId::from(value)
    }

    #[test]
    fn total_sums_selected_lines() -> TestResult {
        let mut cart = loaded(
            vec![
                item("a", Decimal::new(10, 0), 2),
                item("b", Decimal::new(5, 0), 1),
            ],
            false,
        )?;

        cart.select(&id("a"), true, 2)?;
        cart.select(&id("b"), true, 1)?;

        assert_eq!(cart.total()?, Money::from_minor(2500, USD));
        assert_eq!(cart.count(), 2);

        cart.select(&id("a"), false, 2)?;

        assert_eq!(cart.total()?, Money::from_minor(500, USD));
        assert_eq!(cart.count(), 1);

        Ok(())
    }

    #[test]
    fn selecting_unknown_line_fails() -> TestResult {
        let mut cart = loaded(vec![item("a", Decimal::ONE, 1)], false)?;

        assert_eq!(
            cart.select(&id("zzz"), true, 1),
            Err(CartError::UnknownLine(id("zzz")))
        );

        Ok(())
    }

    #[test]
    fn selecting_with_zero_quantity_fails() -> TestResult {
        let mut cart = loaded(vec![item("a", Decimal::ONE, 1)], false)?;

        assert_eq!(
            cart.select(&id("a"), true, 0),
            Err(CartError::InvalidQuantity(id("a")))
        );
        assert_eq!(cart.count(), 0);

        Ok(())
    }

    #[test]
    fn unpriceable_row_fails_the_fetch() -> TestResult {
        let mut cart = Cart::new(USD, SortDirection::Desc);
        let ticket = cart.first_request()?;

        let result = cart.merge_page(&ticket, Page::of(vec![item("a", Decimal::new(-5, 0), 1)]));

        assert_eq!(
            result,
            Err(CartError::Price(PriceError::Negative(Decimal::new(-5, 0))))
        );
        assert!(!cart.paging().is_loading(), "failed fetch is no longer in flight");
        assert!(cart.paging().error().is_some(), "failure is recorded");
        assert!(cart.lines().is_empty());

        let retry = cart.first_request()?;
        cart.merge_page(&retry, Page::of(vec![item("a", Decimal::ONE, 1)]))?;

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.paging().error(), None);

        Ok(())
    }

    #[test]
    fn change_quantity_updates_selected_line() -> TestResult {
        let mut cart = loaded(vec![item("a", Decimal::new(3, 0), 1)], false)?;

        cart.select(&id("a"), true, 1)?;
        cart.change_quantity(&id("a"), 4)?;

        assert_eq!(cart.selected(&id("a")).map(|s| s.quantity), Some(4));
        assert_eq!(cart.total()?, Money::from_minor(1200, USD));

        Ok(())
    }

    #[test]
    fn change_quantity_on_unselected_line_only_sets_override() -> TestResult {
        let mut cart = loaded(vec![item("a", Decimal::new(3, 0), 1)], false)?;

        cart.change_quantity(&id("a"), 4)?;

        assert!(!cart.is_selected(&id("a")));
        assert_eq!(cart.line(&id("a")).map(CartLine::quantity), Some(4));
        assert_eq!(cart.total()?, Money::from_minor(0, USD));

        Ok(())
    }

    #[test]
    fn reselecting_restores_last_quantity() -> TestResult {
        let mut cart = loaded(vec![item("a", Decimal::ONE, 2)], false)?;

        cart.select(&id("a"), true, 2)?;
        cart.change_quantity(&id("a"), 7)?;

        assert!(!cart.toggle(&id("a"))?);
        assert!(cart.toggle(&id("a"))?);
        assert_eq!(cart.selected(&id("a")).map(|s| s.quantity), Some(7));

        Ok(())
    }

    #[test]
    fn toggle_on_fresh_line_uses_owned_quantity() -> TestResult {
        let mut cart = loaded(vec![item("a", Decimal::ONE, 3)], false)?;

        cart.toggle(&id("a"))?;

        assert_eq!(cart.selected(&id("a")).map(|s| s.quantity), Some(3));

        Ok(())
    }

    #[test]
    fn select_all_and_toggle_all() -> TestResult {
        let mut cart = loaded(
            vec![item("a", Decimal::ONE, 1), item("b", Decimal::ONE, 2)],
            false,
        )?;

        cart.select(&id("a"), true, 1)?;
        assert!(cart.some_selected());
        assert!(!cart.all_selected());

        cart.toggle_all();
        assert!(cart.all_selected());
        assert!(!cart.some_selected());
        assert_eq!(cart.count(), 2);

        cart.toggle_all();
        assert_eq!(cart.count(), 0);

        Ok(())
    }

    #[test]
    fn empty_cart_is_never_all_selected() {
        let cart = Cart::new(USD, SortDirection::Desc);

        assert!(!cart.all_selected());
        assert!(!cart.some_selected());
    }

    #[test]
    fn checkout_items_follow_row_order() -> TestResult {
        let mut cart = loaded(
            vec![
                item("a", Decimal::ONE, 1),
                item("b", Decimal::ONE, 1),
                item("c", Decimal::ONE, 1),
            ],
            false,
        )?;

        cart.select(&id("c"), true, 3)?;
        cart.select(&id("a"), true, 1)?;

        assert_eq!(
            cart.checkout_items(),
            vec![
                OrderItemRequest {
                    product_id: "product-a".to_string(),
                    quantity: 1
                },
                OrderItemRequest {
                    product_id: "product-c".to_string(),
                    quantity: 3
                },
            ]
        );

        Ok(())
    }

    #[test]
    fn removed_lines_drop_out_of_selection() -> TestResult {
        let mut cart = loaded(
            vec![item("a", Decimal::ONE, 1), item("b", Decimal::ONE, 1)],
            false,
        )?;

        cart.select_all();
        cart.remove_lines(&[id("a")]);

        assert_eq!(cart.count(), 1);
        assert_eq!(cart.lines().len(), 1);

        Ok(())
    }

    #[test]
    fn reload_keeps_selection_of_rows_still_present() -> TestResult {
        let mut cart = loaded(
            vec![item("a", Decimal::ONE, 1), item("b", Decimal::ONE, 1)],
            false,
        )?;

        cart.select(&id("a"), true, 4)?;
        cart.select(&id("b"), true, 1)?;

        cart.reload();
        let ticket = cart.first_request()?;
        cart.merge_page(&ticket, Page::of(vec![item("a", Decimal::ONE, 1)]))?;

        assert_eq!(cart.count(), 1);
        assert!(cart.is_selected(&id("a")));
        assert_eq!(cart.line(&id("a")).map(CartLine::quantity), Some(4));

        Ok(())
    }

    #[test]
    fn selection_survives_partial_reload() -> TestResult {
        let mut cart = loaded(
            vec![item("a", Decimal::ONE, 1), item("b", Decimal::ONE, 1)],
            false,
        )?;

        cart.select(&id("b"), true, 1)?;

        cart.reload();
        let ticket = cart.first_request()?;
        cart.merge_page(
            &ticket,
            Page {
                has_next: true,
                ..Page::of(vec![item("a", Decimal::ONE, 1)])
            },
        )?;

        assert!(cart.is_selected(&id("b")));
        assert_eq!(cart.checkout_items().len(), 1);

        Ok(())
    }

    #[test]
    fn zero_exponent_currency_totals_in_whole_units() -> TestResult {
        let mut cart = Cart::new(VND, SortDirection::Desc);
        let ticket = cart.first_request()?;
        cart.merge_page(
            &ticket,
            Page::of(vec![item("a", Decimal::new(150_000, 0), 2)]),
        )?;

        cart.select_all();

        assert_eq!(cart.total()?, Money::from_minor(300_000, VND));

        Ok(())
    }
}
