//! Cart Lines

use std::fmt::{Display, Formatter, Result as FmtResult};

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};

use crate::{
    models::CartItem,
    money::{PriceError, line_total, price_from_decimal},
    paging::Keyed,
};

/// Identifier of a cart row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartLineId(String);

impl CartLineId {
    /// Wrap a backend row id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CartLineId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl From<&str> for CartLineId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A loaded cart row with its user-overridden quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    id: CartLineId,
    product_id: String,
    title: String,
    handle: String,
    unit_price: Money<'static, Currency>,
    owned_quantity: u32,
    quantity: u32,
    in_stock: bool,
    image: Option<String>,
    image_alt: Option<String>,
}

impl CartLine {
    /// Build a line from a backend cart row, pricing it in `currency`.
    ///
    /// The overridden quantity starts at the owned quantity, or 1 when the
    /// backend reports none.
    ///
    /// # Errors
    ///
    /// Returns a [`PriceError`] if the row's price cannot be represented.
    pub fn from_item(item: CartItem, currency: &'static Currency) -> Result<Self, PriceError> {
        let unit_price = price_from_decimal(item.price, currency)?;

        Ok(Self {
            id: CartLineId(item.id),
            product_id: item.product_id,
            title: item.product_title,
            handle: item.handle,
            unit_price,
            owned_quantity: item.quantity,
            quantity: item.quantity.max(1),
            in_stock: item.in_stock,
            image: item.image_src,
            image_alt: item.image_alt,
        })
    }

    /// Row id.
    pub fn id(&self) -> &CartLineId {
        &self.id
    }

    /// Product id.
    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    /// Product title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Product handle.
    pub fn handle(&self) -> &str {
        &self.handle
    }

    /// Price of one unit.
    pub fn unit_price(&self) -> Money<'static, Currency> {
        self.unit_price
    }

    /// Quantity stored in the remote cart.
    pub fn owned_quantity(&self) -> u32 {
        self.owned_quantity
    }

    /// Quantity the user has chosen for checkout.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Whether the product is in stock.
    pub fn in_stock(&self) -> bool {
        self.in_stock
    }

    /// Image URL and alt text.
    pub fn image(&self) -> Option<(&str, Option<&str>)> {
        self.image
            .as_deref()
            .map(|src| (src, self.image_alt.as_deref()))
    }

    /// Override the quantity. Zero is ignored and returns `false`.
    pub(crate) fn set_quantity(&mut self, quantity: u32) -> bool {
        if quantity == 0 {
            return false;
        }

        self.quantity = quantity;

        true
    }

    /// Unit price times the overridden quantity.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Overflow`] if the total does not fit.
    pub fn total(&self) -> Result<Money<'static, Currency>, PriceError> {
        line_total(self.unit_price, self.quantity)
    }
}

impl Keyed for CartLine {
    type Key = CartLineId;

    fn key(&self) -> CartLineId {
        self.id.clone()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::iso;
    use testresult::TestResult;

    use super::*;

    fn item(quantity: u32) -> CartItem {
        CartItem {
            id: "row-1".to_string(),
            in_stock: true,
            product_title: "Desk lamp".to_string(),
            product_id: "lamp".to_string(),
            handle: "desk-lamp".to_string(),
            price: Decimal::new(12_000, 0),
            quantity,
            image_src: Some("https://cdn.example/lamp.png".to_string()),
            image_alt: None,
        }
    }

    #[test]
    fn override_defaults_to_owned_quantity() -> TestResult {
        let line = CartLine::from_item(item(3), iso::VND)?;

        assert_eq!(line.owned_quantity(), 3);
        assert_eq!(line.quantity(), 3);
        assert_eq!(line.total()?, Money::from_minor(36_000, iso::VND));

        Ok(())
    }

    #[test]
    fn empty_owned_quantity_defaults_override_to_one() -> TestResult {
        let line = CartLine::from_item(item(0), iso::VND)?;

        assert_eq!(line.quantity(), 1);

        Ok(())
    }

    #[test]
    fn zero_override_is_ignored() -> TestResult {
        let mut line = CartLine::from_item(item(2), iso::VND)?;

        assert!(!line.set_quantity(0));
        assert!(line.set_quantity(5));
        assert_eq!(line.quantity(), 5);
        assert_eq!(line.owned_quantity(), 2);

        Ok(())
    }
}
