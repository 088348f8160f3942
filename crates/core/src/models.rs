//! Wire models shared by the API client and the state models.
//!
//! Field names follow the backend's camelCase JSON. Optional and
//! display-only fields default when absent so a partial payload still
//! decodes.

use std::fmt::{Display, Formatter, Result as FmtResult};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::paging::Keyed;

/// Sort direction accepted by list endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// Query-string value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    #[serde(default)]
    pub handle: String,
    pub title: String,
    #[serde(default)]
    pub purchase_count: u64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub review_count: u64,
    pub price: Decimal,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub product_image: Option<String>,
    #[serde(default)]
    pub image_alt: Option<String>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub sole_quantity: u64,
}

impl Keyed for Product {
    type Key = String;

    fn key(&self) -> String {
        self.id.clone()
    }
}

/// Product as returned by the detail endpoint, gallery included.
pub type ProductDetail = Product;

/// Product gallery image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    pub id: i64,
    pub src: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub position: u32,
}

/// Product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub handle: String,
    #[serde(default)]
    pub description: String,
}

/// Product vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: String,
    pub name: String,
    pub handle: String,
    #[serde(default)]
    pub description: String,
}

/// A row of the user's remote cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: String,
    #[serde(default)]
    pub in_stock: bool,
    pub product_title: String,
    pub product_id: String,
    #[serde(default)]
    pub handle: String,
    pub price: Decimal,
    pub quantity: u32,
    #[serde(default)]
    pub image_src: Option<String>,
    #[serde(default)]
    pub image_alt: Option<String>,
}

impl Keyed for CartItem {
    type Key = String;

    fn key(&self) -> String {
        self.id.clone()
    }
}

/// Request body for adding a product to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: String,
    pub quantity: u32,
}

/// One entry of an order request, built from the cart selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub product_id: String,
    pub quantity: u32,
}

/// Response to an order request: where to send the user to pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
    pub url: String,
}

/// Request body for saving a product to the wishlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistRequest {
    pub product_id: String,
}

macro_rules! division_code {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
                Display::fmt(&self.0, f)
            }
        }

        impl From<u32> for $name {
            fn from(value: u32) -> Self {
                Self(value)
            }
        }
    };
}

division_code!(
    /// Province code.
    ProvinceCode
);

division_code!(
    /// District code.
    DistrictCode
);

division_code!(
    /// Ward code.
    WardCode
);

/// Province.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Province {
    pub id: i64,
    pub code: ProvinceCode,
    pub name: String,
    #[serde(default)]
    pub codename: String,
    #[serde(default)]
    pub division_type: String,
    #[serde(default)]
    pub short_code_name: String,
}

impl Keyed for Province {
    type Key = ProvinceCode;

    fn key(&self) -> ProvinceCode {
        self.code
    }
}

/// District within a province.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct District {
    pub id: i64,
    pub code: DistrictCode,
    pub name: String,
    #[serde(default)]
    pub codename: String,
    #[serde(default)]
    pub division_type: String,
    #[serde(default)]
    pub short_code_name: String,
    pub province_code: ProvinceCode,
}

impl Keyed for District {
    type Key = DistrictCode;

    fn key(&self) -> DistrictCode {
        self.code
    }
}

/// Ward within a district.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ward {
    pub id: i64,
    pub code: WardCode,
    pub name: String,
    #[serde(default)]
    pub codename: String,
    #[serde(default)]
    pub division_type: String,
    #[serde(default)]
    pub short_code_name: String,
    pub district_code: DistrictCode,
}

impl Keyed for Ward {
    type Key = WardCode;

    fn key(&self) -> WardCode {
        self.code
    }
}

/// Kind of delivery address.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressKind {
    Home,
    #[default]
    Office,
}

/// Request body for saving the user's delivery address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAddressRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub receiver_name: String,
    pub phone_number: String,
    pub full_address: String,
    pub province_code: ProvinceCode,
    pub district_code: DistrictCode,
    pub ward_code: WardCode,
    pub address_type: AddressKind,
}

/// The user's saved delivery address, with division names resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAddressResponse {
    #[serde(default)]
    pub id: Option<String>,
    pub receiver_name: String,
    pub phone_number: String,
    pub full_address: String,
    pub province: String,
    pub district: String,
    pub ward: String,
    pub address_type: AddressKind,
}

/// Payment as recorded by the backend after the gateway returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub id: String,
    pub order_id: String,
    #[serde(default)]
    pub vnp_txn_ref: String,
    #[serde(default)]
    pub vnp_transaction_no: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub bank_code: String,
    #[serde(default)]
    pub card_type: String,
    #[serde(default)]
    pub pay_date: String,
    #[serde(default)]
    pub response_code: String,
    #[serde(default)]
    pub transaction_status: String,
    #[serde(default)]
    pub payment_status: String,
}
