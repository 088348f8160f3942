//! Backend services, one per resource family.

pub mod addresses;
pub mod carts;
pub mod catalog;
pub mod payments;
pub mod wishlist;
