use clap::Args;
use tracing::{info, warn};
use trolley_app::{context::AppContext, errors::AppError};

use crate::cli::{line::LineArgs, show};

#[derive(Debug, Args)]
pub(crate) struct RemoveArgs {
    #[command(flatten)]
    line: LineArgs,
}

pub(crate) fn run(context: &AppContext<'_>, args: &RemoveArgs) -> Result<(), AppError> {
    let mut store = context.open_store();
    let key = args.line.key();

    if store.remove_item(&key)? {
        info!(%key, "removed from cart");
    } else {
        warn!(%key, "no matching line in cart");
    }

    show::write_summary(store.cart())
}
