//! Add one unit of a product.

use anyhow::Result;

use super::{finish, AddArgs};
use crate::context::Context;

/// Run the add command.
pub async fn run(args: AddArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;

    let spinner = ctx.output.spinner(&format!("Checking stock for product {}...", args.id));
    let result = store.add_product(args.id).await;
    spinner.finish_and_clear();

    if result.is_ok() {
        ctx.output.success(&format!("Added product {}", args.id));
    }
    finish(result, || store.cart(), ctx)
}
