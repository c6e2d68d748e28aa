//! Storefront application: file-backed cart storage, configuration, logging
//! and order submission around the `storefront` cart.

pub mod checkout;
pub mod config;
pub mod gateway;
pub mod storage;
pub mod telemetry;
