use std::sync::Arc;

use clap::Args;
use storefront::prices::Price;
use storefront_app::{checkout::CheckoutService, config::AppConfig, gateway::HttpOrderGateway};

#[derive(Debug, Args)]
pub(crate) struct OrderArgs {
    /// Document id printed at checkout
    document_id: String,
}

pub(crate) async fn run(config: &AppConfig, args: OrderArgs) -> Result<(), String> {
    let service = CheckoutService::new(Arc::new(HttpOrderGateway::new(config.api_url.clone())));

    let order = service
        .order(&args.document_id)
        .await
        .map_err(|error| format!("failed to fetch order {}: {error}", args.document_id))?;

    let money = |price: Price| {
        price
            .to_money(config.currency)
            .map(|money| money.to_string())
            .map_err(|error| format!("amount out of range: {error}"))
    };

    println!("order_number: {}", order.order_number);
    println!("status: {:?}", order.status);
    println!(
        "customer: {} {} <{}>",
        order.customer.first_name, order.customer.last_name, order.customer.email
    );
    println!(
        "ship_to: {}, {} {}, {}",
        order.customer.address, order.customer.postal_code, order.customer.city, order.customer.country
    );

    for item in &order.items {
        println!(
            "  {} x {} @ {}",
            item.quantity,
            item.title,
            money(item.unit_price)?
        );
    }

    println!("total: {}", money(order.total)?);

    Ok(())
}
