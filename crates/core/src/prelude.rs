//! Storefront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, CartLine},
    catalog::Catalog,
    orders::{Customer, NewOrder, Order, OrderError, OrderItem, OrderStatus},
    prices::Price,
    products::{Product, ProductId},
    storage::{CartStorage, MemoryStorage, StorageError},
    store::{CART_STORAGE_KEY, CartStore},
    summary::write_summary,
};
