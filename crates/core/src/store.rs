//! Cart Store
//!
//! Owns the cart, applies every mutation, and writes the result through to
//! storage before returning.

use rusty_money::iso::Currency;
use tracing::{debug, warn};

use crate::{
    cart::{Cart, CartError},
    products::{Product, ProductId},
    storage::{CartStorage, StorageError},
};

/// Storage key the cart is kept under.
pub const CART_STORAGE_KEY: &str = "cart";

/// Single source of truth for the shopping cart.
#[derive(Debug)]
pub struct CartStore<S: CartStorage> {
    storage: S,
    key: String,
    cart: Cart,
}

impl<S: CartStorage> CartStore<S> {
    /// Load the cart from storage under [`CART_STORAGE_KEY`].
    ///
    /// A missing entry yields an empty cart. An entry that fails to parse or
    /// breaks a cart invariant is removed and replaced by an empty cart.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError::Storage`] if the backend cannot be read, or
    /// cannot remove a rejected entry.
    pub fn load(storage: S, currency: &'static Currency) -> Result<Self, CartError> {
        Self::load_with_key(storage, CART_STORAGE_KEY, currency)
    }

    /// Load the cart from storage under a custom key.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError::Storage`] if the backend cannot be read, or
    /// cannot remove a rejected entry.
    pub fn load_with_key(
        mut storage: S,
        key: impl Into<String>,
        currency: &'static Currency,
    ) -> Result<Self, CartError> {
        let key = key.into();

        let cart = match storage.get(&key) {
            Ok(None) => Cart::new(currency),
            Ok(Some(stored)) => match Cart::decode(&stored, currency) {
                Ok(cart) => {
                    debug!(
                        key = %key,
                        lines = cart.len(),
                        item_count = cart.item_count(),
                        "restored cart"
                    );

                    cart
                }
                Err(error) => discard(&mut storage, &key, &error, currency)?,
            },
            Err(error @ StorageError::Corrupt { .. }) => {
                discard(&mut storage, &key, &error, currency)?
            }
            Err(error) => return Err(error.into()),
        };

        Ok(Self { storage, key, cart })
    }

    /// Read-only view of the cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The storage key this store writes to.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Give back the storage backend.
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Add `quantity` units of `product`.
    ///
    /// An existing line for the product grows by `quantity`; otherwise a new
    /// line pins the product's title, prices and stock. Either way the line
    /// quantity is capped at the stock limit. Returns the line quantity.
    ///
    /// The cart only changes once the write has succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantity`] for a zero quantity,
    /// [`CartError::OutOfStock`] for a new product without stock, or a
    /// storage error if the cart cannot be written.
    pub fn add_to_cart(&mut self, product: &Product, quantity: u32) -> Result<u32, CartError> {
        let quantity = self.commit(|cart| cart.add(product, quantity))?;

        debug!(
            product = %product.id,
            quantity,
            item_count = self.cart.item_count(),
            subtotal = *self.cart.subtotal(),
            "added to cart"
        );

        Ok(quantity)
    }

    /// Set the quantity of a line, clamped into `1..=stock_limit`.
    ///
    /// Never removes a line. Returns the new quantity, or `None` without
    /// writing anything if the product is not in the cart.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the cart cannot be written; the cart is
    /// left as it was.
    pub fn update_quantity(
        &mut self,
        product: ProductId,
        quantity: i64,
    ) -> Result<Option<u32>, CartError> {
        if !self.cart.contains(product) {
            debug!(%product, "update ignored, product not in cart");
            return Ok(None);
        }

        let updated = self.commit(|cart| Ok(cart.update_quantity(product, quantity)))?;

        debug!(
            %product,
            requested = quantity,
            quantity = updated,
            item_count = self.cart.item_count(),
            subtotal = *self.cart.subtotal(),
            "updated quantity"
        );

        Ok(updated)
    }

    /// Remove a product's line. Returns whether a line was removed; removing
    /// an unknown product writes nothing.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the cart cannot be written; the cart is
    /// left as it was.
    pub fn remove_from_cart(&mut self, product: ProductId) -> Result<bool, CartError> {
        if !self.cart.contains(product) {
            debug!(%product, "remove ignored, product not in cart");
            return Ok(false);
        }

        let removed = self.commit(|cart| Ok(cart.remove(product)))?;

        debug!(
            %product,
            item_count = self.cart.item_count(),
            subtotal = *self.cart.subtotal(),
            "removed from cart"
        );

        Ok(removed)
    }

    /// Empty the cart and drop the stored entry.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the entry cannot be removed; the cart is
    /// left as it was.
    pub fn clear_cart(&mut self) -> Result<(), CartError> {
        self.commit(|cart| {
            cart.clear();
            Ok(())
        })?;

        debug!("cleared cart");

        Ok(())
    }

    /// Whether the product has a line in the cart.
    pub fn is_in_cart(&self, product: ProductId) -> bool {
        self.cart.contains(product)
    }

    /// Apply `change` to a copy of the cart, write the copy through, and only
    /// then make it current.
    fn commit<T>(
        &mut self,
        change: impl FnOnce(&mut Cart) -> Result<T, CartError>,
    ) -> Result<T, CartError> {
        let mut next = self.cart.clone();
        let value = change(&mut next)?;

        if next.is_empty() {
            self.storage.remove(&self.key)?;
        } else {
            let encoded = next.encode()?;

            self.storage.set(&self.key, &encoded)?;
        }

        self.cart = next;

        Ok(value)
    }
}

fn discard<S: CartStorage>(
    storage: &mut S,
    key: &str,
    error: &dyn std::error::Error,
    currency: &'static Currency,
) -> Result<Cart, CartError> {
    warn!(key = %key, %error, "discarding stored cart");

    storage.remove(key)?;

    Ok(Cart::new(currency))
}
