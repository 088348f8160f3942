//! Cart selection over paged cart rows

use rust_decimal::Decimal;
use rusty_money::{Money, iso::USD};
use storefront::{
    cart::{Cart, CartLineId},
    models::{CartItem, SortDirection},
    paging::Page,
};
use testresult::TestResult;

fn rows(range: std::ops::RangeInclusive<u32>) -> Vec<CartItem> {
    range
        .map(|n| CartItem {
            id: format!("row-{n}"),
            in_stock: true,
            product_title: format!("Product {n}"),
            product_id: format!("product-{n}"),
            handle: format!("product-{n}"),
            price: Decimal::ONE,
            quantity: 1,
            image_src: None,
            image_alt: None,
        })
        .collect()
}

#[test]
fn two_selected_rows_total_and_count() -> TestResult {
    let page: Page<CartItem> = serde_json::from_str(
        r#"{
            "content": [
                {"id": "A", "productTitle": "Lamp", "productId": "lamp", "price": 10, "quantity": 2},
                {"id": "B", "productTitle": "Mug", "productId": "mug", "price": 5, "quantity": 1}
            ],
            "totalPages": 1,
            "last": true
        }"#,
    )?;

    let mut cart = Cart::new(USD, SortDirection::Desc);
    let ticket = cart.first_request()?;
    cart.merge_page(&ticket, page)?;

    let a = CartLineId::from("A");
    let b = CartLineId::from("B");

    cart.select(&a, true, 2)?;
    cart.select(&b, true, 1)?;

    assert_eq!(cart.total()?, Money::from_minor(25_00, USD));
    assert_eq!(cart.count(), 2);

    cart.select(&a, false, 2)?;

    assert_eq!(cart.total()?, Money::from_minor(5_00, USD));
    assert_eq!(cart.count(), 1);

    Ok(())
}

#[test]
fn load_more_appends_second_page() -> TestResult {
    let mut cart = Cart::new(USD, SortDirection::Desc);

    let ticket = cart.first_request()?;
    cart.merge_page(
        &ticket,
        Page {
            has_next: true,
            total_pages: 2,
            ..Page::of(rows(1..=20))
        },
    )?;

    let first_twenty: Vec<CartLineId> = cart.lines().iter().map(|l| l.id().clone()).collect();

    let ticket = cart.next_request()?;
    assert_eq!(ticket.page(), 2);
    cart.merge_page(
        &ticket,
        Page {
            last: true,
            total_pages: 2,
            ..Page::of(rows(21..=40))
        },
    )?;

    assert_eq!(cart.lines().len(), 40);
    assert!(
        cart.lines()
            .iter()
            .take(20)
            .map(|l| l.id().clone())
            .eq(first_twenty),
        "first page rows must be unchanged"
    );
    assert!(!cart.paging().has_more());

    Ok(())
}

#[test]
fn select_all_spans_every_loaded_page() -> TestResult {
    let mut cart = Cart::new(USD, SortDirection::Desc);

    let ticket = cart.first_request()?;
    cart.merge_page(
        &ticket,
        Page {
            has_next: true,
            ..Page::of(rows(1..=3))
        },
    )?;

    let ticket = cart.next_request()?;
    cart.merge_page(&ticket, Page::of(rows(4..=5)))?;

    cart.select_all();

    assert_eq!(cart.count(), 5);
    assert_eq!(cart.total()?, Money::from_minor(5_00, USD));
    assert_eq!(cart.checkout_items().len(), 5);

    Ok(())
}
