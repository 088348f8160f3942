//! Storefront
//!
//! Client-side state models for a storefront: cart selection, cumulative
//! pagination, the province/district/ward address cascade and the auth gate
//! guarding protected views. Nothing in this crate performs I/O.

pub mod address;
pub mod cart;
pub mod models;
pub mod money;
pub mod paging;
pub mod session;
