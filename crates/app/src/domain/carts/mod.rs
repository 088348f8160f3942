//! Carts

pub mod service;

pub use service::*;
