//! Addresses

pub mod service;

pub use service::*;
