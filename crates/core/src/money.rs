//! Money

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

/// Errors raised while converting or multiplying prices.
#[derive(Debug, Error, PartialEq)]
pub enum PriceError {
    /// A negative price was received.
    #[error("price {0} is negative")]
    Negative(Decimal),

    /// The price does not fit in the currency's minor units (amount, currency code).
    #[error("price {0} cannot be represented in {1} minor units")]
    OutOfRange(Decimal, &'static str),

    /// A line total overflowed.
    #[error("line total overflowed")]
    Overflow,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Convert a decimal wire price into money of the given currency.
///
/// Fractions below the currency's minor unit are rounded half-even.
///
/// # Errors
///
/// - [`PriceError::Negative`]: the amount is below zero.
/// - [`PriceError::OutOfRange`]: the amount does not fit in `i64` minor units.
pub fn price_from_decimal(
    amount: Decimal,
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, PriceError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(PriceError::Negative(amount));
    }

    let out_of_range = || PriceError::OutOfRange(amount, currency.iso_alpha_code);

    let scale = 10_i64
        .checked_pow(currency.exponent)
        .map(Decimal::from)
        .ok_or_else(out_of_range)?;

    let minor = amount
        .checked_mul(scale)
        .map(|scaled| scaled.round())
        .and_then(|scaled| scaled.to_i64())
        .ok_or_else(out_of_range)?;

    Ok(Money::from_minor(minor, currency))
}

/// Multiply a unit price by a quantity.
///
/// # Errors
///
/// Returns [`PriceError::Overflow`] when the result does not fit in `i64` minor units.
pub fn line_total<'a>(
    unit_price: Money<'a, Currency>,
    quantity: u32,
) -> Result<Money<'a, Currency>, PriceError> {
    let minor = unit_price
        .to_minor_units()
        .checked_mul(i64::from(quantity))
        .ok_or(PriceError::Overflow)?;

    Ok(Money::from_minor(minor, unit_price.currency()))
}

/// Zero in the given currency.
pub fn zero(currency: &'static Currency) -> Money<'static, Currency> {
    Money::from_minor(0, currency)
}
