//! Storefront
//!
//! Client-side shopping cart for the storefront: the cart state machine and
//! its derived totals, write-through persistence to a key-value storage
//! area, and the order payload built from the cart at checkout.

pub mod cart;
pub mod catalog;
pub mod orders;
pub mod prelude;
pub mod prices;
pub mod products;
pub mod storage;
pub mod store;
pub mod summary;
