//! CLI command implementations.

pub mod add;
pub mod config;
pub mod remove;
pub mod show;
pub mod update;

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;
use stockcart_commerce::prelude::*;
use stockcart_store::CartError;
use thiserror::Error;

use crate::context::Context;
use crate::output::format_price;

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Print only the totals.
    #[arg(long)]
    pub summary: bool,
}

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Product ID.
    pub id: ProductId,
}

/// Arguments for the remove command.
#[derive(Args)]
pub struct RemoveArgs {
    /// Product ID.
    pub id: ProductId,
}

/// Arguments for the update command.
#[derive(Args)]
pub struct UpdateArgs {
    /// Product ID.
    pub id: ProductId,

    /// New amount (at least 1).
    #[arg(allow_negative_numbers = true)]
    pub amount: i64,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: Option<ConfigCommand>,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Set a config value.
    Set {
        /// Config key (dot-separated).
        key: String,
        /// Value to set.
        value: String,
    },
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the configuration.
    Validate,
}

/// JSON shape of a printed cart.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CartView<'a> {
    items: &'a Cart,
    item_count: u64,
    total: f64,
}

/// Print `cart` as a table, or as JSON in JSON mode.
pub fn print_cart(cart: &Cart, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&CartView {
            items: cart,
            item_count: cart.item_count(),
            total: cart.subtotal(),
        });
        return;
    }

    if cart.is_empty() {
        ctx.output.info("Cart is empty");
        return;
    }

    ctx.output.header("Cart");
    let widths = [6, 32, 12, 6, 12];
    ctx.output
        .table_row(&["ID", "PRODUCT", "PRICE", "QTY", "SUBTOTAL"], &widths);
    for item in cart {
        ctx.output.table_row(
            &[
                &item.id().to_string(),
                &item.product.name,
                &format_price(item.product.price),
                &item.amount.to_string(),
                &format_price(item.subtotal()),
            ],
            &widths,
        );
    }
    print_summary(cart, ctx);
}

/// Print the unit count and total.
pub fn print_summary(cart: &Cart, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "itemCount": cart.item_count(),
            "total": cart.subtotal(),
        }));
        return;
    }
    println!();
    ctx.output.kv("items", &cart.item_count().to_string());
    ctx.output.kv("total", &format_price(cart.subtotal()));
}

/// A cart rejection whose alert the console sink has already shown.
#[derive(Error, Debug)]
#[error(transparent)]
pub struct Reported(pub CartError);

/// Whether `error` was already shown to the user.
pub fn already_reported(error: &anyhow::Error) -> bool {
    error.downcast_ref::<Reported>().is_some()
}

/// Print the outcome of a cart mutation.
///
/// Silent rejections print the current cart and succeed. Other
/// rejections have already raised an alert and become a [`Reported`]
/// error.
pub fn finish<F>(result: Result<Cart, CartError>, current: F, ctx: &Context) -> Result<()>
where
    F: FnOnce() -> Cart,
{
    match result {
        Ok(cart) => {
            print_cart(&cart, ctx);
            Ok(())
        }
        Err(e) if e.is_silent() => {
            ctx.output.debug(&e.to_string());
            print_cart(&current(), ctx);
            Ok(())
        }
        Err(e) => {
            ctx.output.debug(&e.to_string());
            Err(Reported(e).into())
        }
    }
}
