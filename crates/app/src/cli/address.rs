use std::io::Write;

use clap::{Args, Subcommand, ValueEnum};
use storefront::models::{AddressKind, DistrictCode, ProvinceCode, WardCode};
use storefront_app::{context::AppContext, pages::address::AddressPage, render};

use super::{confirm, failure};

#[derive(Debug, Args)]
pub(crate) struct AddressCommand {
    #[command(subcommand)]
    command: AddressSubcommand,
}

#[derive(Debug, Subcommand)]
enum AddressSubcommand {
    /// Show the saved delivery address
    Show,

    /// List provinces
    Provinces(ListArgs),

    /// List the districts of a province
    Districts(DistrictsArgs),

    /// List the wards of a district
    Wards(WardsArgs),

    /// Save the delivery address
    Set(SetArgs),
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Load every page instead of the first one
    #[arg(long)]
    all: bool,
}

#[derive(Debug, Args)]
struct DistrictsArgs {
    /// Province code
    province: u32,

    #[command(flatten)]
    list: ListArgs,
}

#[derive(Debug, Args)]
struct WardsArgs {
    /// Province code
    province: u32,

    /// District code
    district: u32,

    #[command(flatten)]
    list: ListArgs,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Kind {
    Home,
    Office,
}

impl From<Kind> for AddressKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Home => Self::Home,
            Kind::Office => Self::Office,
        }
    }
}

#[derive(Debug, Args)]
struct SetArgs {
    /// Receiver name
    #[arg(long)]
    receiver_name: String,

    /// Receiver phone number
    #[arg(long)]
    phone_number: String,

    /// Street address
    #[arg(long)]
    full_address: String,

    /// Province code
    #[arg(long)]
    province: u32,

    /// District code
    #[arg(long)]
    district: u32,

    /// Ward code
    #[arg(long)]
    ward: u32,

    /// Address kind
    #[arg(long, value_enum, default_value_t = Kind::Office)]
    kind: Kind,
}

pub(crate) async fn run(
    context: &AppContext,
    command: AddressCommand,
    out: &mut impl Write,
) -> Result<(), String> {
    let mut page = context.address_page();

    match command.command {
        AddressSubcommand::Show => match page.load_saved().await.map_err(|error| failure(&error))? {
            Some(address) => render::address(out, &address).map_err(|error| error.to_string()),
            None => confirm(out, "No delivery address saved yet."),
        },
        AddressSubcommand::Provinces(args) => {
            page.load_provinces().await.map_err(|error| failure(&error))?;

            while args.all && page.province_listing().has_more() {
                page.more_provinces().await.map_err(|error| failure(&error))?;
            }

            render::divisions(out, page.provinces()).map_err(|error| error.to_string())
        }
        AddressSubcommand::Districts(args) => {
            select_province(&mut page, args.province).await?;

            while args.list.all && page.district_listing().has_more() {
                page.more_districts().await.map_err(|error| failure(&error))?;
            }

            render::divisions(out, page.districts()).map_err(|error| error.to_string())
        }
        AddressSubcommand::Wards(args) => {
            select_province(&mut page, args.province).await?;
            page.select_district(DistrictCode(args.district))
                .await
                .map_err(|error| failure(&error))?;

            while args.list.all && page.ward_listing().has_more() {
                page.more_wards().await.map_err(|error| failure(&error))?;
            }

            render::divisions(out, page.wards()).map_err(|error| error.to_string())
        }
        AddressSubcommand::Set(args) => {
            page.load_saved().await.map_err(|error| failure(&error))?;
            page.set_details(
                args.receiver_name,
                args.phone_number,
                args.full_address,
                args.kind.into(),
            );

            select_province(&mut page, args.province).await?;
            page.select_district(DistrictCode(args.district))
                .await
                .map_err(|error| failure(&error))?;
            page.select_ward(WardCode(args.ward))
                .map_err(|error| failure(&error))?;

            let message = page.submit().await.map_err(|error| failure(&error))?;

            confirm(out, &message)
        }
    }
}

async fn select_province(page: &mut AddressPage, province: u32) -> Result<(), String> {
    page.select_province(ProvinceCode(province))
        .await
        .map_err(|error| failure(&error))?;

    Ok(())
}
