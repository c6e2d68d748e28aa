//! Products

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::prices::Price;

/// Catalog product identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    /// Wrap a raw catalog id.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw catalog id.
    #[must_use]
    pub const fn into_inner(self) -> u64 {
        self.0
    }
}

impl From<u64> for ProductId {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

/// Product, as seen by the cart at the moment it is added.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Product id
    pub id: ProductId,

    /// Display name
    pub title: String,

    /// Regular price
    pub price: Price,

    /// Discounted price, if one is set
    pub sale_price: Option<Price>,

    /// Whether the sale price applies
    pub on_sale: bool,

    /// Available stock
    pub stock: u32,

    /// Primary image reference
    pub image: Option<String>,

    /// URL slug
    pub slug: String,
}

impl Product {
    /// The price a customer pays for one unit.
    pub fn effective_price(&self) -> Price {
        effective_price(self.price, self.sale_price, self.on_sale)
    }
}

/// Sale price when the product is on sale and a non-zero sale price is set,
/// otherwise the regular price.
pub(crate) fn effective_price(price: Price, sale_price: Option<Price>, on_sale: bool) -> Price {
    match sale_price {
        Some(sale) if on_sale && *sale > 0 => sale,
        _ => price,
    }
}
