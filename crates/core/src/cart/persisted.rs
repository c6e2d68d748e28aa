//! Persisted cart format.
//!
//! This is the document stored under the cart key, and the shape checkout
//! code reads `items`, `total` and `count` from:
//!
//! ```json
//! {
//!   "items": [
//!     { "id": 1, "title": "Red Wine", "price": 12.5, "quantity": 2,
//!       "image": "/uploads/red.png", "slug": "red-wine", "stock": 24,
//!       "on_sale": true, "sale_price": 9.9 }
//!   ],
//!   "total": 19.8,
//!   "count": 2
//! }
//! ```

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::{
    cart::{CartLine, errors::CartValidationError},
    prices::Price,
    products::ProductId,
};

/// Serialised cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedCart {
    /// Cart lines in insertion order
    pub items: Vec<PersistedLine>,

    /// Cached subtotal; recomputed on load rather than trusted
    #[serde(default)]
    pub total: Price,

    /// Cached item count; recomputed on load rather than trusted
    #[serde(default)]
    pub count: u64,
}

/// Serialised cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedLine {
    /// Product id
    pub id: ProductId,

    /// Display name
    pub title: String,

    /// Regular price
    pub price: Price,

    /// Quantity
    pub quantity: u32,

    /// Image reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// URL slug
    pub slug: String,

    /// Stock limit
    pub stock: u32,

    /// Whether the sale price applies
    #[serde(default)]
    pub on_sale: Option<bool>,

    /// Discounted price
    #[serde(default)]
    pub sale_price: Option<Price>,
}

impl From<&CartLine> for PersistedLine {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.product_id,
            title: line.title.clone(),
            price: line.unit_price,
            quantity: line.quantity,
            image: line.image.clone(),
            slug: line.slug.clone(),
            stock: line.stock_limit,
            on_sale: Some(line.on_sale),
            sale_price: line.sale_price,
        }
    }
}

impl PersistedCart {
    /// Check the structural invariants and turn the stored items into cart
    /// lines.
    ///
    /// # Errors
    ///
    /// Returns a [`CartValidationError`] for a zero quantity, a quantity above
    /// the stock limit, or a product listed twice.
    pub fn into_lines(self) -> Result<Vec<CartLine>, CartValidationError> {
        let mut seen = FxHashSet::default();

        self.items
            .into_iter()
            .map(|item| {
                if item.quantity == 0 {
                    return Err(CartValidationError::ZeroQuantity(item.id));
                }

                if item.quantity > item.stock {
                    return Err(CartValidationError::ExceedsStock {
                        product: item.id,
                        quantity: item.quantity,
                        stock: item.stock,
                    });
                }

                if !seen.insert(item.id) {
                    return Err(CartValidationError::DuplicateProduct(item.id));
                }

                Ok(CartLine {
                    product_id: item.id,
                    title: item.title,
                    unit_price: item.price,
                    sale_price: item.sale_price,
                    on_sale: item.on_sale.unwrap_or(false),
                    quantity: item.quantity,
                    stock_limit: item.stock,
                    image: item.image,
                    slug: item.slug,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn item(id: u64, quantity: u32, stock: u32) -> PersistedLine {
        PersistedLine {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: Price::new(500),
            quantity,
            image: None,
            slug: format!("product-{id}"),
            stock,
            on_sale: None,
            sale_price: None,
        }
    }

    fn cart(items: Vec<PersistedLine>) -> PersistedCart {
        PersistedCart {
            items,
            total: Price::ZERO,
            count: 0,
        }
    }

    #[test]
    fn parses_storefront_document() -> TestResult {
        let json = r#"{
            "items": [
                { "id": 3, "title": "Cheese", "price": 7.5, "quantity": 2,
                  "slug": "cheese", "stock": 4, "on_sale": true, "sale_price": null },
                { "id": 4, "title": "Bread", "price": 2, "quantity": 1,
                  "image": "/uploads/bread.png", "slug": "bread", "stock": 9 }
            ],
            "total": 17,
            "count": 3
        }"#;

        let persisted: PersistedCart = serde_json::from_str(json)?;
        let lines = persisted.into_lines()?;

        assert_eq!(lines.len(), 2);
        assert_eq!(lines.first().map(CartLine::unit_price), Some(Price::new(750)));
        assert_eq!(lines.first().map(CartLine::sale_price), Some(None));
        assert_eq!(lines.get(1).map(CartLine::on_sale), Some(false));
        assert_eq!(
            lines.get(1).and_then(CartLine::image),
            Some("/uploads/bread.png")
        );

        Ok(())
    }

    #[test]
    fn rejects_zero_quantity() {
        let result = cart(vec![item(1, 0, 3)]).into_lines();

        assert_eq!(
            result,
            Err(CartValidationError::ZeroQuantity(ProductId::new(1)))
        );
    }

    #[test]
    fn rejects_quantity_above_stock() {
        let result = cart(vec![item(1, 4, 3)]).into_lines();

        assert_eq!(
            result,
            Err(CartValidationError::ExceedsStock {
                product: ProductId::new(1),
                quantity: 4,
                stock: 3,
            })
        );
    }

    #[test]
    fn rejects_duplicate_products() {
        let result = cart(vec![item(1, 1, 3), item(2, 1, 3), item(1, 2, 3)]).into_lines();

        assert_eq!(
            result,
            Err(CartValidationError::DuplicateProduct(ProductId::new(1)))
        );
    }

    #[test]
    fn rejects_negative_prices_while_parsing() {
        let json = r#"{ "items": [ { "id": 1, "title": "X", "price": -1, "quantity": 1,
            "slug": "x", "stock": 1 } ], "total": 0, "count": 0 }"#;

        assert!(serde_json::from_str::<PersistedCart>(json).is_err());
    }

    #[test]
    fn missing_totals_default_to_zero() -> TestResult {
        let persisted: PersistedCart = serde_json::from_str(r#"{ "items": [] }"#)?;

        assert_eq!(persisted.total, Price::ZERO);
        assert_eq!(persisted.count, 0);

        Ok(())
    }
}
