use std::io::Write;

use clap::{Args, Subcommand};
use storefront_app::{context::AppContext, pages::payment::PaymentPage, render};

use super::{confirm, failure};

#[derive(Debug, Args)]
pub(crate) struct PaymentCommand {
    #[command(subcommand)]
    command: PaymentSubcommand,
}

#[derive(Debug, Subcommand)]
enum PaymentSubcommand {
    /// Show a recorded payment
    Show(ShowArgs),

    /// Report the gateway's return to the backend
    Confirm(ConfirmArgs),
}

#[derive(Debug, Args)]
struct ShowArgs {
    /// Payment id
    payment_id: String,
}

#[derive(Debug, Args)]
struct ConfirmArgs {
    /// Query string the gateway returned with, `?` optional
    query: String,
}

pub(crate) async fn run(
    context: &AppContext,
    command: PaymentCommand,
    out: &mut impl Write,
) -> Result<(), String> {
    let page = context.payment_page();

    match command.command {
        PaymentSubcommand::Show(args) => {
            let payment = page
                .payment(&args.payment_id)
                .await
                .map_err(|error| failure(&error))?;

            render::payment(out, &payment).map_err(|error| error.to_string())
        }
        PaymentSubcommand::Confirm(args) => {
            let gateway = PaymentPage::parse_return(&args.query);

            render::gateway_return(out, &gateway).map_err(|error| error.to_string())?;

            let payment_id = page
                .confirm(&gateway)
                .await
                .map_err(|error| failure(&error))?;

            confirm(out, &format!("Payment recorded: {payment_id}"))
        }
    }
}
