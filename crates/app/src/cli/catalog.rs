use std::io::Write;

use clap::{Args, ValueEnum};
use storefront::{models::SortDirection, paging::MergeMode};
use storefront_app::{
    context::AppContext,
    domain::catalog::models::{ProductQuery, ProductSort},
    render,
};

use super::{confirm, failure};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum Direction {
    Asc,
    Desc,
}

impl From<Direction> for SortDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Asc => Self::Asc,
            Direction::Desc => Self::Desc,
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct ProductsArgs {
    /// Category handle to filter by
    #[arg(long)]
    category: Option<String>,

    /// Vendor handle to filter by
    #[arg(long)]
    vendor: Option<String>,

    /// Field to sort by
    #[arg(long, value_enum)]
    sort: Option<ProductSort>,

    /// Sort direction
    #[arg(long, value_enum, default_value_t = Direction::Desc)]
    direction: Direction,

    /// Show this page only
    #[arg(long, conflicts_with = "pages")]
    page: Option<u32>,

    /// Number of pages to load, one after another
    #[arg(long, default_value_t = 1)]
    pages: u32,

    /// Add this product to the cart after listing
    #[arg(long)]
    add: Option<String>,

    /// Quantity to add
    #[arg(long, default_value_t = 1, requires = "add")]
    quantity: u32,
}

#[derive(Debug, Args)]
pub(crate) struct ProductArgs {
    /// Product id
    id: String,
}

pub(crate) async fn products(
    context: &AppContext,
    args: ProductsArgs,
    out: &mut impl Write,
) -> Result<(), String> {
    let mut page = context.catalog_page();

    page.set_query(ProductQuery {
        category: args.category,
        vendor: args.vendor,
        sort: args.sort,
        direction: args.direction.into(),
    });

    match args.page {
        Some(number) => {
            page.set_mode(MergeMode::Replace);
            page.go_to(number).await.map_err(|error| failure(&error))?;
        }
        None => {
            page.load_first().await.map_err(|error| failure(&error))?;

            for _ in 1..args.pages {
                if !page.listing().has_more() {
                    break;
                }

                page.load_more().await.map_err(|error| failure(&error))?;
            }
        }
    }

    render::products(out, page.listing(), &page.links(), context.currency)
        .map_err(|error| error.to_string())?;

    if let Some(product_id) = args.add {
        let message = page
            .add_to_cart(&product_id, args.quantity)
            .await
            .map_err(|error| failure(&error))?;

        confirm(out, &message)?;
    }

    Ok(())
}

pub(crate) async fn product(
    context: &AppContext,
    args: ProductArgs,
    out: &mut impl Write,
) -> Result<(), String> {
    let detail = context
        .catalog_page()
        .product(&args.id)
        .await
        .map_err(|error| failure(&error))?;

    render::product(out, &detail, context.currency).map_err(|error| error.to_string())
}

pub(crate) async fn categories(context: &AppContext, out: &mut impl Write) -> Result<(), String> {
    let categories = context
        .catalog_page()
        .categories()
        .await
        .map_err(|error| failure(&error))?;

    render::categories(out, &categories).map_err(|error| error.to_string())
}

pub(crate) async fn vendors(context: &AppContext, out: &mut impl Write) -> Result<(), String> {
    let vendors = context
        .catalog_page()
        .vendors()
        .await
        .map_err(|error| failure(&error))?;

    render::vendors(out, &vendors).map_err(|error| error.to_string())
}
