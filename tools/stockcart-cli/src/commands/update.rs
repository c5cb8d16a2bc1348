//! Set the amount held for a product.

use anyhow::Result;
use stockcart_store::UpdateProductAmount;

use super::{finish, UpdateArgs};
use crate::context::Context;

/// Run the update command.
pub async fn run(args: UpdateArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;

    let spinner = ctx.output.spinner(&format!("Checking stock for product {}...", args.id));
    let result = store
        .update_product_amount(UpdateProductAmount {
            product_id: args.id,
            amount: args.amount,
        })
        .await;
    spinner.finish_and_clear();

    if result.is_ok() {
        ctx.output
            .success(&format!("Product {} amount set to {}", args.id, args.amount));
    }
    finish(result, || store.cart(), ctx)
}
