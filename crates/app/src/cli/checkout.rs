use std::io;

use tracing::info;
use trolley_app::{checkout::JsonHandoff, context::AppContext, errors::AppError};

pub(crate) fn run(context: &AppContext<'_>) -> Result<(), AppError> {
    let mut store = context.open_store();
    let mut handoff = JsonHandoff::new(io::stdout().lock());

    store.checkout(&mut handoff)?;

    info!(key = store.key(), "checked out cart");

    Ok(())
}
