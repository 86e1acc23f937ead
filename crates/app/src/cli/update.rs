use clap::Args;
use tracing::{info, warn};
use trolley_app::{context::AppContext, errors::AppError};

use crate::cli::{line::LineArgs, show};

#[derive(Debug, Args)]
pub(crate) struct UpdateArgs {
    #[command(flatten)]
    line: LineArgs,

    /// New quantity; zero or less removes the line
    #[arg(short, long, allow_negative_numbers = true)]
    quantity: i64,
}

pub(crate) fn run(context: &AppContext<'_>, args: &UpdateArgs) -> Result<(), AppError> {
    let mut store = context.open_store();
    let key = args.line.key();

    if store.update_quantity(&key, args.quantity)? {
        info!(%key, quantity = args.quantity, "updated cart line");
    } else {
        warn!(%key, "no matching line in cart");
    }

    show::write_summary(store.cart())
}
