//! Cart errors.

use thiserror::Error;

use crate::{products::ProductId, storage::StorageError};

/// Errors returned by cart mutations.
#[derive(Debug, Error)]
pub enum CartError {
    /// A product must be added with a positive quantity.
    #[error("product {0} must be added with a positive quantity")]
    InvalidQuantity(ProductId),

    /// The product has no stock to add.
    #[error("product {0} is out of stock")]
    OutOfStock(ProductId),

    /// The cart could not be serialised for storage.
    #[error("failed to encode cart")]
    Encode(#[from] serde_json::Error),

    /// The storage backend failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Reasons a persisted cart is rejected at load time.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartValidationError {
    /// A line holds a quantity of zero.
    #[error("product {0} has a zero quantity")]
    ZeroQuantity(ProductId),

    /// A line holds more than its stock limit.
    #[error("product {product} has quantity {quantity} above its stock limit {stock}")]
    ExceedsStock {
        /// Product id
        product: ProductId,

        /// Stored quantity
        quantity: u32,

        /// Stored stock limit
        stock: u32,
    },

    /// Two lines reference the same product.
    #[error("product {0} appears more than once")]
    DuplicateProduct(ProductId),
}

/// Errors decoding a persisted cart.
#[derive(Debug, Error)]
pub enum CartDecodeError {
    /// The stored text is not a cart document.
    #[error("failed to parse stored cart")]
    Parse(#[from] serde_json::Error),

    /// The stored cart breaks a cart invariant.
    #[error("stored cart is invalid")]
    Invalid(#[from] CartValidationError),
}
