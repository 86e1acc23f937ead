//! Checkout handoff
//!
//! The CLI has no payment provider; checking out writes the snapshot as JSON for whatever creates
//! the payment session downstream.

use std::io;

use thiserror::Error;
use trolley::checkout::{CheckoutCollaborator, CheckoutSnapshot};

/// Errors raised while handing a snapshot off.
#[derive(Debug, Error)]
pub enum HandoffError {
    /// The snapshot could not be serialized or written.
    #[error("failed to write checkout snapshot: {0}")]
    Json(#[from] serde_json::Error),

    /// The output could not be flushed.
    #[error("failed to write checkout snapshot: {0}")]
    Io(#[from] io::Error),
}

/// Writes checkout snapshots as pretty-printed JSON.
#[derive(Debug)]
pub struct JsonHandoff<W> {
    out: W,
}

impl<W: io::Write> JsonHandoff<W> {
    /// Hand snapshots off to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the handoff, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: io::Write> CheckoutCollaborator for JsonHandoff<W> {
    type Session = ();
    type Error = HandoffError;

    fn begin_checkout(&mut self, snapshot: &CheckoutSnapshot) -> Result<(), HandoffError> {
        serde_json::to_writer_pretty(&mut self.out, snapshot)?;
        writeln!(self.out)?;
        self.out.flush()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::USD};
    use testresult::TestResult;
    use trolley::prelude::*;

    use super::*;

    #[test]
    fn snapshot_is_written_as_json() -> TestResult {
        let mut cart = Cart::new(PricingPolicy::default());
        let tote = Product {
            id: ProductId::from("tote"),
            name: "Canvas Tote".to_string(),
            category: "accessories".to_string(),
            image: None,
            price: Money::from_minor(10_00, USD),
            variants: Vec::new(),
        };

        cart.add_selection(&tote, LineSelection::attributes([("color", "sand")]), 3)?;

        let mut handoff = JsonHandoff::new(Vec::new());
        handoff.begin_checkout(&CheckoutSnapshot::from(&cart))?;

        let json: serde_json::Value = serde_json::from_slice(&handoff.into_inner())?;

        assert_eq!(json["currency"], "USD");
        assert_eq!(
            json["lines"][0]["key"],
            serde_json::json!({
                "product_id": "tote",
                "selection": {"kind": "attributes", "value": [{"name": "color", "value": "sand"}]}
            })
        );
        assert_eq!(json["lines"][0]["description"], "Color: sand");
        assert_eq!(json["lines"][0]["unit_amount"], 10_00);
        assert_eq!(json["lines"][0]["quantity"], 3);
        assert_eq!(json["subtotal"], 30_00);
        assert_eq!(json["total"], 42_40);

        Ok(())
    }
}
