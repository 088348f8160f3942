//! Table output for the command line.

use std::io;

use rusty_money::iso::Currency;
use storefront::{
    cart::{Cart, CartError},
    models::{
        AddressKind, Category, District, PaymentRecord, Product, ProductDetail, Province,
        UserAddressResponse, Vendor, Ward,
    },
    money::{PriceError, line_total, price_from_decimal},
    paging::{Keyed, PageAccumulator, PageLink},
};
use tabled::{
    builder::Builder,
    settings::{Color, Style, object::Rows},
};
use thiserror::Error;

use crate::domain::payments::GatewayReturn;

/// Errors raised while rendering output.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write output")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Price(#[from] PriceError),

    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Product listing with its paging footer.
pub fn products<C>(
    out: &mut impl io::Write,
    listing: &PageAccumulator<Product, C>,
    links: &[PageLink],
    currency: &'static Currency,
) -> Result<(), RenderError>
where
    C: Clone + PartialEq + std::fmt::Debug,
{
    let mut builder = Builder::default();
    builder.push_record(["ID", "Product", "Price", "Rating", "Sold", "Available"]);

    for product in listing.items() {
        builder.push_record([
            product.id.clone(),
            product.title.clone(),
            price_from_decimal(product.price, currency)?.to_string(),
            format!("{:.1} ({})", product.average_rating, product.review_count),
            product.purchase_count.to_string(),
            yes_no(product.available).to_string(),
        ]);
    }

    write_table(out, builder)?;

    writeln!(
        out,
        "{} of {} products  {}",
        listing.len(),
        listing.total_elements(),
        format_links(links, listing.current_page())
    )?;

    Ok(())
}

pub fn product(
    out: &mut impl io::Write,
    product: &ProductDetail,
    currency: &'static Currency,
) -> Result<(), RenderError> {
    let mut builder = Builder::default();

    builder.push_record(["Title", product.title.as_str()]);
    builder.push_record(["Handle", product.handle.as_str()]);
    builder.push_record([
        "Price".to_string(),
        price_from_decimal(product.price, currency)?.to_string(),
    ]);
    builder.push_record([
        "Rating".to_string(),
        format!("{:.1} from {} reviews", product.average_rating, product.review_count),
    ]);
    builder.push_record(["In stock".to_string(), product.sole_quantity.to_string()]);
    builder.push_record(["Tags", product.tags.as_str()]);
    builder.push_record(["Description", product.description.as_str()]);

    for image in &product.images {
        builder.push_record([format!("Image {}", image.position), image.src.clone()]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());

    writeln!(out, "{table}")?;

    Ok(())
}

pub fn categories(out: &mut impl io::Write, categories: &[Category]) -> Result<(), RenderError> {
    let mut builder = Builder::default();
    builder.push_record(["ID", "Name", "Handle"]);

    for category in categories {
        builder.push_record([
            category.id.to_string(),
            category.name.clone(),
            category.handle.clone(),
        ]);
    }

    write_table(out, builder)
}

pub fn vendors(out: &mut impl io::Write, vendors: &[Vendor]) -> Result<(), RenderError> {
    let mut builder = Builder::default();
    builder.push_record(["ID", "Name", "Handle"]);

    for vendor in vendors {
        builder.push_record([vendor.id.clone(), vendor.name.clone(), vendor.handle.clone()]);
    }

    write_table(out, builder)
}

/// Cart rows, selection marks and the selected subtotal.
pub fn cart(out: &mut impl io::Write, cart: &Cart) -> Result<(), RenderError> {
    let mut builder = Builder::default();
    builder.push_record(["", "ID", "Product", "Unit Price", "Qty", "Total", "In Stock"]);

    for line in cart.lines() {
        let quantity = cart
            .selected(line.id())
            .map_or(line.quantity(), |selected| selected.quantity);

        builder.push_record([
            if cart.is_selected(line.id()) { "[x]" } else { "[ ]" }.to_string(),
            line.id().to_string(),
            line.title().to_string(),
            line.unit_price().to_string(),
            quantity.to_string(),
            line_total(line.unit_price(), quantity)?.to_string(),
            yes_no(line.in_stock()).to_string(),
        ]);
    }

    write_table(out, builder)?;

    writeln!(
        out,
        " Selected: {} of {}\n Total: {}",
        cart.count(),
        cart.lines().len(),
        cart.total()?
    )?;

    Ok(())
}

/// Code and name of administrative divisions.
pub fn divisions<T>(out: &mut impl io::Write, divisions: &[T]) -> Result<(), RenderError>
where
    T: Keyed + Division,
    T::Key: std::fmt::Display,
{
    let mut builder = Builder::default();
    builder.push_record(["Code", "Name"]);

    for division in divisions {
        builder.push_record([division.key().to_string(), division.name().to_string()]);
    }

    write_table(out, builder)
}

/// A named administrative division.
pub trait Division {
    fn name(&self) -> &str;
}

impl Division for Province {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Division for District {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Division for Ward {
    fn name(&self) -> &str {
        &self.name
    }
}

pub fn address(out: &mut impl io::Write, address: &UserAddressResponse) -> Result<(), RenderError> {
    let mut builder = Builder::default();

    builder.push_record(["Receiver", address.receiver_name.as_str()]);
    builder.push_record(["Phone", address.phone_number.as_str()]);
    builder.push_record(["Address", address.full_address.as_str()]);
    builder.push_record(["Ward", address.ward.as_str()]);
    builder.push_record(["District", address.district.as_str()]);
    builder.push_record(["Province", address.province.as_str()]);
    builder.push_record([
        "Type",
        match address.address_type {
            AddressKind::Home => "home",
            AddressKind::Office => "office",
        },
    ]);

    let mut table = builder.build();
    table.with(Style::modern_rounded());

    writeln!(out, "{table}")?;

    Ok(())
}

/// Outcome of a payment as reported by the gateway.
pub fn gateway_return(out: &mut impl io::Write, gateway: &GatewayReturn) -> Result<(), RenderError> {
    let amount = match gateway.amount() {
        Some(amount) => amount?.to_string(),
        None => "N/A".to_string(),
    };

    let mut builder = Builder::default();

    builder.push_record([
        "Status",
        if gateway.is_success() {
            "Payment successful"
        } else {
            "Payment failed"
        },
    ]);
    builder.push_record(["Order", gateway.display_order_info().as_str()]);
    builder.push_record(["Amount", amount.as_str()]);
    builder.push_record(["Bank", gateway.bank_name()]);
    builder.push_record(["Card type", gateway.card_type.as_str()]);
    builder.push_record(["Transaction", gateway.transaction_no.as_str()]);
    builder.push_record(["Reference", gateway.txn_ref.as_str()]);
    builder.push_record(["Paid at", gateway.display_pay_date().as_str()]);
    builder.push_record(["Result", gateway.response_message()]);

    let mut table = builder.build();
    table.with(Style::modern_rounded());

    writeln!(out, "{table}")?;

    Ok(())
}

pub fn payment(out: &mut impl io::Write, payment: &PaymentRecord) -> Result<(), RenderError> {
    let mut builder = Builder::default();

    builder.push_record(["Payment", payment.id.as_str()]);
    builder.push_record(["Order", payment.order_id.as_str()]);
    builder.push_record(["Reference", payment.vnp_txn_ref.as_str()]);
    builder.push_record(["Transaction", payment.vnp_transaction_no.as_str()]);
    builder.push_record(["Amount", payment.amount.as_str()]);
    builder.push_record(["Bank", payment.bank_code.as_str()]);
    builder.push_record(["Card type", payment.card_type.as_str()]);
    builder.push_record(["Status", payment.payment_status.as_str()]);

    let mut table = builder.build();
    table.with(Style::modern_rounded());

    writeln!(out, "{table}")?;

    Ok(())
}

fn write_table(out: &mut impl io::Write, builder: Builder) -> Result<(), RenderError> {
    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);

    writeln!(out, "{table}")?;

    Ok(())
}

/// `1 2 [3] 4 5 ... 9`, with the current page bracketed.
fn format_links(links: &[PageLink], current: Option<u32>) -> String {
    links
        .iter()
        .map(|link| match link {
            PageLink::Page(page) if Some(*page) == current => format!("[{page}]"),
            PageLink::Page(page) => page.to_string(),
            PageLink::Ellipsis => "...".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
