use clap::Args;
use rusty_money::Money;
use tracing::info;
use trolley::{
    discounts::Discount,
    fixtures::products::{parse_amount, parse_percentage},
};
use trolley_app::{
    context::AppContext,
    errors::{AppError, ConfigError},
};

use crate::cli::show;

#[derive(Debug, Args)]
pub(crate) struct DiscountArgs {
    /// Fixed amount ("5.00") or percentage of the subtotal ("10%")
    amount: String,
}

pub(crate) fn run(context: &AppContext<'_>, args: &DiscountArgs) -> Result<(), AppError> {
    let mut store = context.open_store();
    let currency = store.cart().currency();

    let discount = if args.amount.trim().ends_with('%') {
        Discount::PercentageOff(parse_percentage(&args.amount).map_err(ConfigError::from)?)
    } else {
        let minor = parse_amount(&args.amount, currency).map_err(ConfigError::from)?;

        Discount::AmountOff(Money::from_minor(minor, currency))
    };

    let amount = discount.amount_for(&store.totals().subtotal())?;

    store.apply_discount(amount)?;

    info!(discount = %amount, "applied discount");

    show::write_summary(store.cart())
}
