use std::io::{self, Write};

use clap::Args;
use trolley::prelude::{Cart, CartSummary, CheckoutSnapshot};
use trolley_app::{context::AppContext, errors::AppError};

#[derive(Debug, Args)]
pub(crate) struct ShowArgs {
    /// Print the cart as JSON instead of a table
    #[arg(long)]
    json: bool,
}

pub(crate) fn run(context: &AppContext<'_>, args: &ShowArgs) -> Result<(), AppError> {
    let store = context.open_store();

    if args.json {
        let mut out = io::stdout().lock();

        serde_json::to_writer_pretty(&mut out, &CheckoutSnapshot::from(store.cart()))?;
        writeln!(out)?;

        return Ok(());
    }

    write_summary(store.cart())
}

pub(crate) fn write_summary(cart: &Cart) -> Result<(), AppError> {
    CartSummary::new(cart).write_to(io::stdout().lock())?;

    Ok(())
}
