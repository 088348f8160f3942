//! Payments

pub mod gateway;
pub mod service;

pub use gateway::GatewayReturn;
pub use service::*;
