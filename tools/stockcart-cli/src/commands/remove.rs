//! Remove a product from the cart.

use anyhow::Result;

use super::{finish, RemoveArgs};
use crate::context::Context;

/// Run the remove command.
pub async fn run(args: RemoveArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;

    let result = store.remove_product(args.id);
    if result.is_ok() {
        ctx.output.success(&format!("Removed product {}", args.id));
    }
    finish(result, || store.cart(), ctx)
}
