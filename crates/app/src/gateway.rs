//! Order API client.

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use storefront::orders::{NewOrder, Order};
use thiserror::Error;

/// Errors that can occur when talking to the order API.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body is not an order envelope.
    #[error("failed to decode order API response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The API returned a non-2xx response.
    #[error("unexpected response from order API: {0}")]
    UnexpectedResponse(String),

    /// The API accepted the order but did not identify it.
    #[error("order API response is missing a document id")]
    MissingDocumentId,
}

/// Remote order API.
#[automock]
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Submit a new order.
    async fn create_order(&self, order: NewOrder) -> Result<Order, GatewayError>;

    /// Fetch a submitted order by document id.
    async fn get_order(&self, document_id: String) -> Result<Order, GatewayError>;
}

/// HTTP client for the order API.
#[derive(Debug, Clone)]
pub struct HttpOrderGateway {
    base_url: String,
    http: Client,
}

impl HttpOrderGateway {
    /// Create a client for the API rooted at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: Client::new(),
        }
    }

    fn commands_url(&self) -> String {
        format!("{}/api/commands", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl OrderGateway for HttpOrderGateway {
    async fn create_order(&self, order: NewOrder) -> Result<Order, GatewayError> {
        let response = self
            .http
            .post(self.commands_url())
            .json(&Envelope { data: order })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        created_order(status, &body)
    }

    async fn get_order(&self, document_id: String) -> Result<Order, GatewayError> {
        let url = format!("{}/{document_id}", self.commands_url());

        let response = self
            .http
            .get(&url)
            .query(&[("populate", "*")])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        read_order(status, &body, &format!("get order {document_id}"))
    }
}

/// Request and response wrapper used by the order API.
#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    data: T,
}

fn created_order(status: StatusCode, body: &str) -> Result<Order, GatewayError> {
    let order = read_order(status, body, "create order")?;

    if order.document_id.is_empty() {
        return Err(GatewayError::MissingDocumentId);
    }

    Ok(order)
}

fn read_order(status: StatusCode, body: &str, request: &str) -> Result<Order, GatewayError> {
    if !status.is_success() {
        return Err(GatewayError::UnexpectedResponse(format!(
            "{request} failed with status {status}: {body}"
        )));
    }

    let parsed: Envelope<Order> = serde_json::from_str(body)?;

    Ok(parsed.data)
}
