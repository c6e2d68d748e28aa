//! Cart

use std::num::TryFromIntError;

use rusty_money::{Money, iso::Currency};

use crate::{
    prices::Price,
    products::{Product, ProductId},
};

pub mod errors;
mod line;
pub mod persisted;

pub use errors::{CartDecodeError, CartError, CartValidationError};
pub use line::CartLine;
pub use persisted::{PersistedCart, PersistedLine};

/// Shopping cart.
///
/// Lines are kept in insertion order with at most one line per product. The
/// item count and subtotal are cached and recomputed from the lines after
/// every change.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
    item_count: u64,
    subtotal: Price,
    currency: &'static Currency,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            lines: Vec::new(),
            item_count: 0,
            subtotal: Price::ZERO,
            currency,
        }
    }

    /// Create a cart from existing lines.
    pub(crate) fn with_lines(lines: Vec<CartLine>, currency: &'static Currency) -> Self {
        let mut cart = Cart {
            lines,
            item_count: 0,
            subtotal: Price::ZERO,
            currency,
        };

        cart.recalculate();

        cart
    }

    /// Decode a persisted cart document, validating it on the way in.
    ///
    /// # Errors
    ///
    /// Returns a [`CartDecodeError`] if the text is not a cart document or if
    /// it breaks a cart invariant.
    pub fn decode(json: &str, currency: &'static Currency) -> Result<Self, CartDecodeError> {
        let persisted: PersistedCart = serde_json::from_str(json)?;

        Ok(Cart::with_lines(persisted.into_lines()?, currency))
    }

    /// Encode the cart as a persisted cart document.
    ///
    /// # Errors
    ///
    /// Returns an error if a price cannot be represented as a JSON number.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.to_persisted())
    }

    /// The persisted shape of this cart.
    pub fn to_persisted(&self) -> PersistedCart {
        PersistedCart {
            items: self.lines.iter().map(PersistedLine::from).collect(),
            total: self.subtotal,
            count: self.item_count,
        }
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Iterate over the lines in the cart.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter()
    }

    /// Find the line for a product.
    pub fn line(&self, product: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id() == product)
    }

    /// Whether the product has a line in the cart.
    pub fn contains(&self, product: ProductId) -> bool {
        self.line(product).is_some()
    }

    /// Sum of quantities over all lines.
    pub fn item_count(&self) -> u64 {
        self.item_count
    }

    /// Sum of line totals at effective prices.
    pub fn subtotal(&self) -> Price {
        self.subtotal
    }

    /// Subtotal in the cart currency.
    ///
    /// # Errors
    ///
    /// Returns an error if the subtotal does not fit into `Money`.
    pub fn subtotal_money(&self) -> Result<Money<'static, Currency>, TryFromIntError> {
        self.subtotal.to_money(self.currency)
    }

    /// Get the number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get the currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Add `quantity` units of a product, merging with an existing line and
    /// capping at the stock limit. Returns the resulting line quantity.
    pub(crate) fn add(&mut self, product: &Product, quantity: u32) -> Result<u32, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity(product.id));
        }

        let result = match self.line_mut(product.id) {
            Some(line) => line.increase_quantity(quantity),
            None => {
                if product.stock == 0 {
                    return Err(CartError::OutOfStock(product.id));
                }

                let line = CartLine::from_product(product, quantity.min(product.stock));
                let quantity = line.quantity();

                self.lines.push(line);

                quantity
            }
        };

        self.recalculate();

        Ok(result)
    }

    /// Set a line's quantity, clamped into `1..=stock_limit`. Returns `None`
    /// when the product has no line.
    pub(crate) fn update_quantity(&mut self, product: ProductId, requested: i64) -> Option<u32> {
        let quantity = self.line_mut(product)?.set_quantity_clamped(requested);

        self.recalculate();

        Some(quantity)
    }

    /// Remove a product's line. Returns whether a line was removed.
    pub(crate) fn remove(&mut self, product: ProductId) -> bool {
        let before = self.lines.len();

        self.lines.retain(|line| line.product_id() != product);

        let removed = self.lines.len() != before;

        if removed {
            self.recalculate();
        }

        removed
    }

    /// Drop every line.
    pub(crate) fn clear(&mut self) {
        self.lines.clear();
        self.recalculate();
    }

    fn line_mut(&mut self, product: ProductId) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.product_id() == product)
    }

    fn recalculate(&mut self) {
        self.item_count = self
            .lines
            .iter()
            .map(|line| u64::from(line.quantity()))
            .sum();

        self.subtotal = self
            .lines
            .iter()
            .fold(Price::ZERO, |acc, line| acc.plus(line.line_total()));
    }
}
