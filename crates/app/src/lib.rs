//! Storefront client: API services, page controllers and command-line output.

pub mod api;
pub mod config;
pub mod context;
pub mod domain;
pub mod identity;
pub mod observability;
pub mod pages;
pub mod render;

#[cfg(test)]
mod test;
