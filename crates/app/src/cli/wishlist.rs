use std::io::Write;

use clap::{Args, Subcommand};
use storefront::cart::CartLineId;
use storefront_app::context::AppContext;

use super::{confirm, failure};

#[derive(Debug, Args)]
pub(crate) struct WishlistCommand {
    #[command(subcommand)]
    command: WishlistSubcommand,
}

#[derive(Debug, Subcommand)]
enum WishlistSubcommand {
    /// Save a cart row's product to the wishlist
    Add(AddArgs),
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Cart row id
    line_id: String,
}

pub(crate) async fn run(
    context: &AppContext,
    command: WishlistCommand,
    out: &mut impl Write,
) -> Result<(), String> {
    match command.command {
        WishlistSubcommand::Add(args) => {
            let mut page = context.cart_page();
            page.load_all().await.map_err(|error| failure(&error))?;

            let message = page
                .add_to_wishlist(&CartLineId::new(args.line_id))
                .await
                .map_err(|error| failure(&error))?;

            confirm(out, &message)
        }
    }
}
