use std::sync::Arc;

use clap::Args;
use storefront::orders::{Customer, DEFAULT_COUNTRY};
use storefront_app::{checkout::CheckoutService, config::AppConfig, gateway::HttpOrderGateway};

use super::open_store;

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// Customer first name
    #[arg(long)]
    first_name: String,

    /// Customer last name
    #[arg(long)]
    last_name: String,

    /// Contact email
    #[arg(long)]
    email: String,

    /// Contact phone number
    #[arg(long)]
    phone: String,

    /// Delivery street address
    #[arg(long)]
    address: String,

    /// Delivery postal code
    #[arg(long)]
    postal_code: String,

    /// Delivery city
    #[arg(long)]
    city: String,

    /// Delivery country
    #[arg(long, default_value = DEFAULT_COUNTRY)]
    country: String,

    /// Delivery notes
    #[arg(long)]
    notes: Option<String>,
}

impl From<CheckoutArgs> for Customer {
    fn from(args: CheckoutArgs) -> Self {
        Self {
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            phone: args.phone,
            address: args.address,
            postal_code: args.postal_code,
            city: args.city,
            country: args.country,
            notes: args.notes.unwrap_or_default(),
        }
    }
}

pub(crate) async fn run(config: &AppConfig, args: CheckoutArgs) -> Result<(), String> {
    let mut store = open_store(config)?;
    let service = CheckoutService::new(Arc::new(HttpOrderGateway::new(config.api_url.clone())));

    let order = service
        .checkout(&mut store, args.into())
        .await
        .map_err(|error| format!("checkout failed: {error}"))?;

    println!("order_number: {}", order.order_number);
    println!("document_id: {}", order.document_id);

    Ok(())
}
