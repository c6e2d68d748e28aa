//! Cart summary

use std::{io, num::TryFromIntError};

use rusty_money::iso::Currency;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{cart::Cart, prices::Price};

/// Errors that can occur when rendering a cart summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// An amount does not fit into a money value.
    #[error("amount out of range")]
    Amount(#[from] TryFromIntError),

    /// IO error
    #[error("IO error")]
    IO,
}

/// Write the cart as a table of lines followed by the item count and
/// subtotal.
///
/// # Errors
///
/// Returns an error if an amount cannot be formatted or the output cannot be
/// written.
pub fn write_summary(mut out: impl io::Write, cart: &Cart) -> Result<(), SummaryError> {
    if cart.is_empty() {
        return writeln!(out, "Your cart is empty.").map_err(|_err| SummaryError::IO);
    }

    let currency = cart.currency();
    let mut builder = Builder::default();

    builder.push_record(["#", "Product", "Unit Price", "Qty", "Total"]);

    for line in cart.iter() {
        let unit_price = if line.effective_price() == line.unit_price() {
            money(line.unit_price(), currency)?
        } else {
            format!(
                "{} (was {})",
                money(line.effective_price(), currency)?,
                money(line.unit_price(), currency)?
            )
        };

        builder.push_record([
            line.product_id().to_string(),
            line.title().to_string(),
            unit_price,
            format!("{}/{}", line.quantity(), line.stock_limit()),
            money(line.line_total(), currency)?,
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(2..5), Alignment::right());

    writeln!(out, "{table}").map_err(|_err| SummaryError::IO)?;
    writeln!(out, " Items:    {}", cart.item_count()).map_err(|_err| SummaryError::IO)?;
    writeln!(out, " Subtotal: {}", cart.subtotal_money()?).map_err(|_err| SummaryError::IO)
}

fn money(price: Price, currency: &'static Currency) -> Result<String, SummaryError> {
    Ok(price.to_money(currency)?.to_string())
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::EUR;
    use testresult::TestResult;

    use crate::{
        products::{Product, ProductId},
        storage::MemoryStorage,
        store::CartStore,
    };

    use super::*;

    #[test]
    fn empty_cart_says_so() -> TestResult {
        let mut out = Vec::new();

        write_summary(&mut out, &Cart::new(EUR))?;

        assert_eq!(String::from_utf8(out)?, "Your cart is empty.\n");

        Ok(())
    }

    #[test]
    fn renders_lines_and_totals() -> TestResult {
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
                stock: 40,
                image: None,
                slug: "baguette".to_string(),
            },
            3,
        )?;

        let mut out = Vec::new();
        write_summary(&mut out, store.cart())?;

        let output = String::from_utf8(out)?;

        assert!(output.contains("Red Wine"));
        assert!(output.contains("Baguette"));
        assert!(output.contains("(was "));
        assert!(output.contains("2/10"));
        assert!(output.contains("3/40"));
        assert!(output.contains("Items:    5"));
        assert!(output.contains("Subtotal:"));

        Ok(())
    }
}
