//! Wishlist

pub mod service;

pub use service::*;
