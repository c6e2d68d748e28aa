//! Orders
//!
//! Builds the flattened payload the order API expects from a cart, and
//! decodes the order records it returns.

use jiff::Timestamp;
use serde::{Deserialize, Deserializer, Serialize, de};
use thiserror::Error;

use crate::{cart::Cart, prices::Price, products::ProductId};

/// Country used when the customer does not give one.
pub const DEFAULT_COUNTRY: &str = "France";

/// Errors building an order.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Orders need at least one line.
    #[error("cannot place an order for an empty cart")]
    EmptyCart,

    /// The line items could not be encoded.
    #[error("failed to encode order items")]
    Encode(#[from] serde_json::Error),
}

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Submitted, not yet handled
    Pending,

    /// Being prepared
    Processing,

    /// Fulfilled
    Completed,

    /// Cancelled
    Cancelled,
}

/// Customer details captured at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,

    /// Email address
    pub email: String,

    /// Phone number
    pub phone: String,

    /// Street address
    pub address: String,

    /// Postal code
    pub postal_code: String,

    /// City
    pub city: String,

    /// Country
    #[serde(default = "default_country")]
    pub country: String,

    /// Free-text delivery notes
    #[serde(default)]
    pub notes: String,
}

fn default_country() -> String {
    DEFAULT_COUNTRY.to_string()
}

/// One line of a submitted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Product id
    pub product_id: ProductId,

    /// Display name at the time of ordering
    pub title: String,

    /// Quantity ordered
    pub quantity: u32,

    /// Effective unit price at the time of ordering
    pub unit_price: Price,
}

/// Order submission payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    /// `ORD-` followed by the placement time in Unix milliseconds
    pub order_number: String,

    /// Initial status, always pending
    #[serde(rename = "command_status")]
    pub status: OrderStatus,

    /// Customer fields, flattened into the payload
    #[serde(flatten)]
    pub customer: Customer,

    /// JSON-encoded array of [`OrderItem`]s
    pub items: String,

    /// Cart subtotal
    pub total: Price,
}

impl NewOrder {
    /// Build an order payload from the cart contents.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::EmptyCart`] if the cart has no lines.
    pub fn from_cart(
        cart: &Cart,
        customer: Customer,
        placed_at: Timestamp,
    ) -> Result<Self, OrderError> {
        if cart.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        let items: Vec<OrderItem> = cart
            .iter()
            .map(|line| OrderItem {
                product_id: line.product_id(),
                title: line.title().to_string(),
                quantity: line.quantity(),
                unit_price: line.effective_price(),
            })
            .collect();

        Ok(Self {
            order_number: order_number(placed_at),
            status: OrderStatus::Pending,
            customer,
            items: serde_json::to_string(&items)?,
            total: cart.subtotal(),
        })
    }

    /// Decode the line items carried in the payload.
    ///
    /// # Errors
    ///
    /// Returns an error if `items` is not a JSON array of order items.
    pub fn order_items(&self) -> Result<Vec<OrderItem>, serde_json::Error> {
        serde_json::from_str(&self.items)
    }
}

/// Order number for an order placed at `placed_at`.
pub fn order_number(placed_at: Timestamp) -> String {
    format!("ORD-{}", placed_at.as_millisecond())
}

/// Order record returned by the order API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Numeric record id
    pub id: u64,

    /// Opaque document id used to fetch the order back; empty when the API
    /// leaves it out
    #[serde(default)]
    pub document_id: String,

    /// Order number
    pub order_number: String,

    /// Current status
    #[serde(rename = "command_status")]
    pub status: OrderStatus,

    /// Customer fields
    #[serde(flatten)]
    pub customer: Customer,

    /// Line items
    #[serde(deserialize_with = "deserialize_items")]
    pub items: Vec<OrderItem>,

    /// Order total
    pub total: Price,
}

/// The API echoes `items` back either as the encoded string it was sent or
/// as a decoded JSON array.
fn deserialize_items<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<OrderItem>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Items {
        Encoded(String),
        Decoded(Vec<OrderItem>),
    }

    match Items::deserialize(deserializer)? {
        Items::Encoded(encoded) => serde_json::from_str(&encoded).map_err(de::Error::custom),
        Items::Decoded(items) => Ok(items),
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::EUR;
    use serde_json::json;
    use testresult::TestResult;

    use crate::{products::Product, storage::MemoryStorage, store::CartStore};

    use super::*;

    fn customer() -> Customer {
        Customer {
            first_name: "Camille".to_string(),
            last_name: "Martin".to_string(),
            email: "camille@example.com".to_string(),
            phone: "0102030405".to_string(),
            address: "1 rue de la Paix".to_string(),
            postal_code: "75002".to_string(),
            city: "Paris".to_string(),
            country: DEFAULT_COUNTRY.to_string(),
            notes: String::new(),
        }
    }

    fn cart() -> Result<Cart, Box<dyn std::error::Error>> {
        let mut store = CartStore::load(MemoryStorage::new(), EUR)?;

        store.add_to_cart(
            &Product {
                id: ProductId::new(1),
                title: "Red Wine".to_string(),
                price: Price::new(1250),
                sale_price: Some(Price::new(990)),
                on_sale: true,
                stock: 10,
                image: None,
                slug: "red-wine".to_string(),
            },
            2,
        )?;

        store.add_to_cart(
            &Product {
                id: ProductId::new(2),
                title: "Baguette".to_string(),
                price: Price::new(120),
                sale_price: None,
                on_sale: false,
                stock: 10,
                image: None,
                slug: "baguette".to_string(),
            },
            1,
        )?;

        Ok(store.cart().clone())
    }

    #[test]
    fn from_cart_rejects_empty_cart() {
        let result = NewOrder::from_cart(&Cart::new(EUR), customer(), Timestamp::UNIX_EPOCH);

        assert!(matches!(result, Err(OrderError::EmptyCart)));
    }

    #[test]
    fn order_number_uses_milliseconds() -> TestResult {
        let placed_at = Timestamp::from_millisecond(1_700_000_000_123)?;

        assert_eq!(order_number(placed_at), "ORD-1700000000123");

        Ok(())
    }

    #[test]
    fn from_cart_uses_effective_prices() -> TestResult {
        let order = NewOrder::from_cart(&cart()?, customer(), Timestamp::UNIX_EPOCH)?;

        let items = order.order_items()?;

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total, Price::new(2100));
        assert_eq!(items.len(), 2);
        assert_eq!(items.first().map(|item| item.unit_price), Some(Price::new(990)));
        assert_eq!(items.get(1).map(|item| item.unit_price), Some(Price::new(120)));

        Ok(())
    }

    #[test]
    fn payload_is_flat() -> TestResult {
        let order = NewOrder::from_cart(&cart()?, customer(), Timestamp::UNIX_EPOCH)?;

        let value = serde_json::to_value(&order)?;

        assert_eq!(value.get("orderNumber"), Some(&json!("ORD-0")));
        assert_eq!(value.get("command_status"), Some(&json!("pending")));
        assert_eq!(value.get("firstName"), Some(&json!("Camille")));
        assert_eq!(value.get("postalCode"), Some(&json!("75002")));
        assert_eq!(value.get("country"), Some(&json!("France")));
        assert_eq!(value.get("notes"), Some(&json!("")));
        assert_eq!(value.get("total"), Some(&json!(21.0)));
        assert!(value.get("items").is_some_and(serde_json::Value::is_string));
        assert!(value.get("customer").is_none());

        Ok(())
    }

    #[test]
    fn items_encode_storefront_field_names() -> TestResult {
        let order = NewOrder::from_cart(&cart()?, customer(), Timestamp::UNIX_EPOCH)?;

        let items: Vec<serde_json::Value> = serde_json::from_str(&order.items)?;

        assert_eq!(
            items.first(),
            Some(&json!({ "productId": 1, "title": "Red Wine", "quantity": 2, "unitPrice": 9.9 }))
        );

        Ok(())
    }

    fn order_json(items: serde_json::Value) -> serde_json::Value {
        json!({
            "id": 12,
            "documentId": "abc123",
            "orderNumber": "ORD-1",
            "command_status": "processing",
            "firstName": "Camille",
            "lastName": "Martin",
            "email": "camille@example.com",
            "phone": "0102030405",
            "address": "1 rue de la Paix",
            "postalCode": "75002",
            "city": "Paris",
            "items": items,
            "total": 9.9,
            "createdAt": "2025-01-01T00:00:00.000Z",
        })
    }

    #[test]
    fn order_decodes_encoded_and_decoded_items() -> TestResult {
        let items = json!([
            { "productId": 1, "title": "Red Wine", "quantity": 1, "unitPrice": 9.9 }
        ]);

        let encoded = order_json(json!(serde_json::to_string(&items)?));
        let decoded = order_json(items);

        let from_encoded: Order = serde_json::from_value(encoded)?;
        let from_decoded: Order = serde_json::from_value(decoded)?;

        assert_eq!(from_encoded, from_decoded);
        assert_eq!(from_encoded.status, OrderStatus::Processing);
        assert_eq!(from_encoded.customer.country, DEFAULT_COUNTRY);
        assert_eq!(from_encoded.total, Price::new(990));
        assert_eq!(from_encoded.items.len(), 1);

        Ok(())
    }
}
