use tracing::info;
use trolley_app::{context::AppContext, errors::AppError};

use crate::cli::show;

pub(crate) fn run(context: &AppContext<'_>) -> Result<(), AppError> {
    let mut store = context.open_store();

    store.clear_cart()?;

    info!("cleared cart");

    show::write_summary(store.cart())
}
