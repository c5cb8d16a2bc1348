//! Print the cart.

use anyhow::Result;

use super::{print_cart, print_summary, ShowArgs};
use crate::context::Context;

/// Run the show command.
pub async fn run(args: ShowArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let cart = store.cart();

    if args.summary {
        print_summary(&cart, ctx);
    } else {
        print_cart(&cart, ctx);
    }

    Ok(())
}
