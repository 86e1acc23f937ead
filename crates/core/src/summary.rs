//! Cart Summary

use std::io;

use tabled::{
    builder::Builder,
    settings::{
        Alignment, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{cart::Cart, pricing::PricingError};

/// Errors that can occur when rendering a summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// A line total could not be calculated.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// IO error
    #[error("IO error")]
    IO,
}

/// Human-readable table of a cart's lines and totals.
#[derive(Debug, Clone, Copy)]
pub struct CartSummary<'a> {
    cart: &'a Cart,
}

impl<'a> CartSummary<'a> {
    /// Summarise `cart`.
    #[must_use]
    pub fn new(cart: &'a Cart) -> Self {
        Self { cart }
    }

    /// Writes the summary table followed by the totals.
    ///
    /// # Errors
    ///
    /// Returns an error if a line total overflows or the output cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), SummaryError> {
        if self.cart.is_empty() {
            return writeln!(out, "Cart is empty").map_err(|_err| SummaryError::IO);
        }

        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Selection", "Unit Price", "Qty", "Line Total"]);

        for (idx, line) in self.cart.lines().iter().enumerate() {
            let selection = line
                .snapshot()
                .variant_name()
                .map(str::to_string)
                .or_else(|| line.key().selection().describe())
                .unwrap_or_default();

            builder.push_record([
                format!("#{:<3}", idx + 1),
                line.snapshot().name().to_string(),
                selection,
                format!("{}", line.unit_price()),
                line.quantity().to_string(),
                format!("{}", line.line_total()?),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::new(3..6), Alignment::right());
        table.modify(Rows::first(), Alignment::center());

        writeln!(out, "{table}").map_err(|_err| SummaryError::IO)?;

        write_totals(&mut out, self.cart)
    }
}

fn write_totals(out: &mut impl io::Write, cart: &Cart) -> Result<(), SummaryError> {
    let totals = cart.totals();

    let rows = [
        ("Subtotal:", totals.subtotal()),
        ("Tax:", totals.tax()),
        ("Shipping:", totals.shipping()),
        ("Discount:", totals.discount()),
        ("Total:", totals.total()),
    ];

    let values = rows.map(|(label, amount)| (label, format!("{amount}")));
    let value_width = values.iter().map(|(_, value)| value.len()).max().unwrap_or(0);

    for (label, value) in values {
        writeln!(out, " {label:<10} {value:>value_width$}").map_err(|_err| SummaryError::IO)?;
    }

    Ok(())
}
