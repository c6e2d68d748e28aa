use std::io;

use clap::Args;
use storefront::{cart::CartLine, products::ProductId, summary::write_summary};
use storefront_app::config::AppConfig;

use super::{open_catalog, open_store};

#[derive(Debug, Args)]
pub(crate) struct AddArgs {
    /// Catalog slug of the product
    slug: String,

    /// Number of units to add
    #[arg(long, short, default_value_t = 1)]
    quantity: u32,
}

#[derive(Debug, Args)]
pub(crate) struct UpdateArgs {
    /// Product id
    product_id: u64,

    /// New quantity, clamped between 1 and the stock limit
    #[arg(allow_negative_numbers = true)]
    quantity: i64,
}

#[derive(Debug, Args)]
pub(crate) struct ProductArgs {
    /// Product id
    product_id: u64,
}

pub(crate) fn show(config: &AppConfig) -> Result<(), String> {
    let store = open_store(config)?;

    write_summary(io::stdout().lock(), store.cart())
        .map_err(|error| format!("failed to render cart: {error}"))
}

pub(crate) fn add(config: &AppConfig, args: AddArgs) -> Result<(), String> {
    let catalog = open_catalog(config)?;
    let product = catalog
        .by_slug(&args.slug)
        .ok_or_else(|| format!("no product with slug {}", args.slug))?;

    let mut store = open_store(config)?;
    let previous = store.cart().line(product.id).map_or(0, CartLine::quantity);

    let quantity = store
        .add_to_cart(product, args.quantity)
        .map_err(|error| format!("failed to add {}: {error}", args.slug))?;

    println!("{}: {quantity} in cart", product.title);

    if was_capped(previous, args.quantity, quantity) {
        let stock_limit = store
            .cart()
            .line(product.id)
            .map_or(product.stock, CartLine::stock_limit);

        println!("only {stock_limit} in stock");
    }

    Ok(())
}

/// Whether adding `requested` units to a line holding `previous` fell short.
fn was_capped(previous: u32, requested: u32, quantity: u32) -> bool {
    quantity < previous.saturating_add(requested)
}

pub(crate) fn update(config: &AppConfig, args: UpdateArgs) -> Result<(), String> {
    let mut store = open_store(config)?;
    let product = ProductId::new(args.product_id);

    let updated = store
        .update_quantity(product, args.quantity)
        .map_err(|error| format!("failed to update product {product}: {error}"))?;

    match updated {
        Some(quantity) => println!("product {product}: {quantity} in cart"),
        None => println!("product {product} is not in the cart"),
    }

    Ok(())
}

pub(crate) fn remove(config: &AppConfig, args: ProductArgs) -> Result<(), String> {
    let mut store = open_store(config)?;
    let product = ProductId::new(args.product_id);

    let removed = store
        .remove_from_cart(product)
        .map_err(|error| format!("failed to remove product {product}: {error}"))?;

    if removed {
        println!("removed product {product}");
    } else {
        println!("product {product} is not in the cart");
    }

    Ok(())
}

pub(crate) fn clear(config: &AppConfig) -> Result<(), String> {
    let mut store = open_store(config)?;

    store
        .clear_cart()
        .map_err(|error| format!("failed to clear cart: {error}"))?;

    println!("cart cleared");

    Ok(())
}

pub(crate) fn contains(config: &AppConfig, args: ProductArgs) -> Result<(), String> {
    let store = open_store(config)?;

    if store.is_in_cart(ProductId::new(args.product_id)) {
        println!("yes");
    } else {
        println!("no");
    }

    Ok(())
}
