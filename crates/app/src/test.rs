//! Test Helpers

use rust_decimal::Decimal;
use storefront::{
    models::{CartItem, District, Product, Province, Ward},
    paging::Page,
    session::{Session, UserInfo},
};

use crate::{
    api::ApiClient,
    config::{ApiConfig, CurrencyCode, IdentityConfig},
};

pub(crate) const TEST_USER_ID: &str = "0f8b7c5e-user";

pub(crate) fn api_config(url: &str) -> ApiConfig {
    ApiConfig {
        api_url: url.to_string(),
        api_timeout_seconds: 10,
        page_size: 20,
        currency: CurrencyCode::Vnd,
    }
}

pub(crate) fn identity() -> IdentityConfig {
    IdentityConfig {
        identity_url: Some("https://id.example.com/".to_string()),
        identity_realm: Some("shop".to_string()),
        identity_client_id: Some("storefront".to_string()),
        identity_redirect_uri: "http://localhost:3000/home".to_string(),
    }
}

pub(crate) fn session() -> Session {
    Session::new(
        "test-token",
        UserInfo {
            sub: TEST_USER_ID.to_string(),
            ..UserInfo::default()
        },
    )
}

pub(crate) fn api_client() -> Result<ApiClient, reqwest::Error> {
    ApiClient::new(&api_config("http://storefront.test"), Some(session()))
}

pub(crate) fn product(id: &str, price: i64) -> Product {
    Product {
        id: id.to_string(),
        handle: id.to_string(),
        title: format!("Product {id}"),
        purchase_count: 0,
        description: String::new(),
        average_rating: 0.0,
        review_count: 0,
        price: Decimal::from(price),
        tags: String::new(),
        product_image: None,
        image_alt: None,
        images: Vec::new(),
        available: true,
        sole_quantity: 0,
    }
}

pub(crate) fn cart_item(id: &str, price: i64, quantity: u32) -> CartItem {
    CartItem {
        id: id.to_string(),
        in_stock: true,
        product_title: format!("Product {id}"),
        product_id: format!("product-{id}"),
        handle: id.to_string(),
        price: Decimal::from(price),
        quantity,
        image_src: None,
        image_alt: None,
    }
}

pub(crate) fn province(code: u32) -> Province {
    Province {
        id: i64::from(code),
        code: code.into(),
        name: format!("Province {code}"),
        codename: String::new(),
        division_type: String::new(),
        short_code_name: String::new(),
    }
}

pub(crate) fn district(code: u32, province_code: u32) -> District {
    District {
        id: i64::from(code),
        code: code.into(),
        name: format!("District {code}"),
        codename: String::new(),
        division_type: String::new(),
        short_code_name: String::new(),
        province_code: province_code.into(),
    }
}

pub(crate) fn ward(code: u32, district_code: u32) -> Ward {
    Ward {
        id: i64::from(code),
        code: code.into(),
        name: format!("Ward {code}"),
        codename: String::new(),
        division_type: String::new(),
        short_code_name: String::new(),
        district_code: district_code.into(),
    }
}

/// A page that reports whether another one follows.
pub(crate) fn page<T>(content: Vec<T>, has_next: bool) -> Page<T> {
    Page {
        has_next,
        last: !has_next,
        ..Page::of(content)
    }
}
