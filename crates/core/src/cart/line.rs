//! Cart Lines

use crate::{
    prices::Price,
    products::{Product, ProductId, effective_price},
};

/// One product entry in the cart.
///
/// Title, prices and stock limit are pinned from the product at the moment it
/// was first added and never follow later catalog changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub(super) product_id: ProductId,
    pub(super) title: String,
    pub(super) unit_price: Price,
    pub(super) sale_price: Option<Price>,
    pub(super) on_sale: bool,
    pub(super) quantity: u32,
    pub(super) stock_limit: u32,
    pub(super) image: Option<String>,
    pub(super) slug: String,
}

impl CartLine {
    /// Snapshot a product into a new line. `quantity` must already be within
    /// `1..=product.stock`.
    pub(crate) fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id,
            title: product.title.clone(),
            unit_price: product.price,
            sale_price: product.sale_price,
            on_sale: product.on_sale,
            quantity,
            stock_limit: product.stock,
            image: product.image.clone(),
            slug: product.slug.clone(),
        }
    }

    /// Product id
    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    /// Display name captured at add-time
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Regular price captured at add-time
    pub fn unit_price(&self) -> Price {
        self.unit_price
    }

    /// Sale price captured at add-time
    pub fn sale_price(&self) -> Option<Price> {
        self.sale_price
    }

    /// Whether the sale price applies
    pub fn on_sale(&self) -> bool {
        self.on_sale
    }

    /// Quantity, always within `1..=stock_limit`
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Maximum purchasable quantity
    pub fn stock_limit(&self) -> u32 {
        self.stock_limit
    }

    /// Image reference
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// URL slug
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Price paid per unit.
    pub fn effective_price(&self) -> Price {
        effective_price(self.unit_price, self.sale_price, self.on_sale)
    }

    /// Effective price times quantity.
    pub fn line_total(&self) -> Price {
        self.effective_price().times(self.quantity)
    }

    /// Add to the quantity, capped at the stock limit. Returns the new quantity.
    pub(crate) fn increase_quantity(&mut self, by: u32) -> u32 {
        self.quantity = self.quantity.saturating_add(by).min(self.stock_limit);
        self.quantity
    }

    /// Set the quantity, clamped into `1..=stock_limit`. Returns the new quantity.
    pub(crate) fn set_quantity_clamped(&mut self, requested: i64) -> u32 {
        let clamped = requested.min(i64::from(self.stock_limit)).max(1);

        self.quantity = u32::try_from(clamped).unwrap_or(self.stock_limit);
        self.quantity
    }
}
