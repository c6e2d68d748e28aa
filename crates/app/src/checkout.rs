//! Checkout.

use std::sync::Arc;

use jiff::Timestamp;
use storefront::{
    orders::{Customer, NewOrder, Order, OrderError},
    storage::CartStorage,
    store::CartStore,
};
use thiserror::Error;
use tracing::{info, warn};

use crate::gateway::{GatewayError, OrderGateway};

/// Checkout errors
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nothing to order.
    #[error("your cart is empty")]
    EmptyCart,

    /// The order payload could not be built.
    #[error(transparent)]
    Order(#[from] OrderError),

    /// The order API rejected or never received the order. The cart is kept.
    #[error("order submission failed: {0}")]
    Submission(#[from] GatewayError),
}

/// Turns the cart into a submitted order.
#[derive(Clone)]
pub struct CheckoutService {
    gateway: Arc<dyn OrderGateway>,
}

impl std::fmt::Debug for CheckoutService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutService").finish_non_exhaustive()
    }
}

impl CheckoutService {
    /// Create a checkout service submitting through `gateway`.
    #[must_use]
    pub fn new(gateway: Arc<dyn OrderGateway>) -> Self {
        Self { gateway }
    }

    /// Submit the cart as an order, clearing it once the order is accepted.
    ///
    /// A placed order is always returned, even if clearing the cart fails
    /// afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] without contacting the API when
    /// there is nothing to order, or [`CheckoutError::Submission`] when the
    /// API call fails (the cart is left as it was).
    #[tracing::instrument(skip_all, fields(lines = store.cart().len()))]
    pub async fn checkout<S: CartStorage>(
        &self,
        store: &mut CartStore<S>,
        customer: Customer,
    ) -> Result<Order, CheckoutError> {
        if store.cart().is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let new_order = NewOrder::from_cart(store.cart(), customer, Timestamp::now())?;
        let order_number = new_order.order_number.clone();

        info!(%order_number, total = *new_order.total, "submitting order");

        let order = match self.gateway.create_order(new_order).await {
            Ok(order) => order,
            Err(error) => {
                warn!(%order_number, %error, "order submission failed, keeping cart");
                return Err(error.into());
            }
        };

        info!(
            %order_number,
            document_id = %order.document_id,
            "order placed"
        );

        if let Err(error) = store.clear_cart() {
            warn!(
                %order_number,
                document_id = %order.document_id,
                %error,
                "order placed but the cart could not be cleared"
            );
        }

        Ok(order)
    }

    /// Fetch a placed order for the confirmation view.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Submission`] if the order cannot be fetched.
    pub async fn order(&self, document_id: &str) -> Result<Order, CheckoutError> {
        Ok(self.gateway.get_order(document_id.to_string()).await?)
    }
}
