use std::io::Write;

use clap::{Args, Subcommand};
use storefront::cart::{CartLine, CartLineId};
use storefront_app::{context::AppContext, pages::cart::CartPage, render};

use super::{confirm, failure};

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Show the cart
    List(ListArgs),

    /// Add a product to the cart
    Add(AddArgs),

    /// Delete cart rows
    Remove(RemoveArgs),

    /// Order cart rows and print the payment link
    Checkout(CheckoutArgs),
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Load every page instead of the first one
    #[arg(long)]
    all: bool,
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Product id
    product_id: String,

    /// Quantity to add
    #[arg(long, default_value_t = 1)]
    quantity: u32,
}

#[derive(Debug, Args)]
struct RemoveArgs {
    /// Cart row ids
    #[arg(required = true)]
    ids: Vec<String>,
}

#[derive(Debug, Args)]
struct CheckoutArgs {
    /// Rows to order, as `ID` or `ID=QUANTITY`
    #[arg(required_unless_present = "all")]
    lines: Vec<String>,

    /// Order every row at its current quantity
    #[arg(long)]
    all: bool,
}

pub(crate) async fn run(
    context: &AppContext,
    command: CartCommand,
    out: &mut impl Write,
) -> Result<(), String> {
    let mut page = context.cart_page();

    match command.command {
        CartSubcommand::List(args) => {
            if args.all {
                page.load_all().await.map_err(|error| failure(&error))?;
            } else {
                page.load_first().await.map_err(|error| failure(&error))?;
            }

            render::cart(out, page.cart()).map_err(|error| error.to_string())
        }
        CartSubcommand::Add(args) => {
            let message = context
                .catalog_page()
                .add_to_cart(&args.product_id, args.quantity)
                .await
                .map_err(|error| failure(&error))?;

            confirm(out, &message)
        }
        CartSubcommand::Remove(args) => {
            page.load_first().await.map_err(|error| failure(&error))?;

            let ids = args.ids.iter().map(|id| CartLineId::new(id.as_str())).collect();
            let message = page.delete(ids).await.map_err(|error| failure(&error))?;

            confirm(out, &message)?;
            render::cart(out, page.cart()).map_err(|error| error.to_string())
        }
        CartSubcommand::Checkout(args) => checkout(&mut page, args, out).await,
    }
}

async fn checkout(
    page: &mut CartPage,
    args: CheckoutArgs,
    out: &mut impl Write,
) -> Result<(), String> {
    page.load_all().await.map_err(|error| failure(&error))?;

    if args.all {
        page.cart_mut().select_all();
    }

    for raw in &args.lines {
        let (id, quantity) = parse_line(raw)?;
        let id = CartLineId::new(id);
        let quantity =
            quantity.unwrap_or_else(|| page.cart().line(&id).map_or(1, CartLine::quantity));

        page.cart_mut()
            .select(&id, true, quantity)
            .map_err(|error| error.to_string())?;
    }

    render::cart(out, page.cart()).map_err(|error| error.to_string())?;

    let response = page.checkout().await.map_err(|error| failure(&error))?;

    if !response.message.is_empty() {
        confirm(out, &response.message)?;
    }

    confirm(out, &format!("Pay at: {}", response.url))
}

/// Split `ID=QUANTITY`; the quantity is optional.
fn parse_line(raw: &str) -> Result<(&str, Option<u32>), String> {
    match raw.split_once('=') {
        Some((id, quantity)) => quantity
            .trim()
            .parse()
            .map(|quantity| (id.trim(), Some(quantity)))
            .map_err(|error| format!("invalid quantity in {raw:?}: {error}")),
        None => Ok((raw.trim(), None)),
    }
}
