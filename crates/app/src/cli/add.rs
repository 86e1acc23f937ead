use clap::Args;
use tracing::info;
use trolley::prelude::{Catalog, VariantId};
use trolley_app::{context::AppContext, errors::AppError};

use crate::cli::{line::LineArgs, show};

#[derive(Debug, Args)]
pub(crate) struct AddArgs {
    #[command(flatten)]
    line: LineArgs,

    /// Units to add
    #[arg(short, long, default_value_t = 1)]
    quantity: u32,
}

pub(crate) fn run(context: &AppContext<'_>, args: &AddArgs) -> Result<(), AppError> {
    let catalog = context.load_catalog()?;
    let mut store = context.open_store();
    let product_id = args.line.product_id();

    let key = if let Some(variant_id) = &args.line.variant {
        let (product, variant) = catalog.lookup_variant(&VariantId::from(variant_id.as_str()))?;

        if product.id != product_id {
            return Err(AppError::VariantMismatch {
                product: args.line.product.clone(),
                variant: variant_id.clone(),
            });
        }

        store.add_item(product, Some(variant), args.quantity)?
    } else {
        let product = catalog.lookup_product(&product_id)?;

        store.add_selection(product, args.line.selection(), args.quantity)?
    };

    info!(%key, quantity = args.quantity, "added to cart");

    show::write_summary(store.cart())
}
