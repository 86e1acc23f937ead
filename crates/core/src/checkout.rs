//! Checkout
//!
//! The cart hands a read-only snapshot to a payment collaborator. Amounts are in minor units, the
//! shape a payment-session creator consumes.

use serde::Serialize;
use thiserror::Error;

use crate::{
    cart::{
        Cart,
        line::{CartLine, LineKey},
    },
    store::StoreError,
};

/// Errors raised while checking out.
#[derive(Debug, Error)]
pub enum CheckoutError<E: std::error::Error + 'static> {
    /// There is nothing to pay for.
    #[error("cannot check out an empty cart")]
    EmptyCart,

    /// The collaborator refused or failed; the cart is unchanged.
    #[error("checkout failed")]
    Collaborator(#[source] E),

    /// Checkout succeeded but the emptied cart could not be persisted.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Something that turns a cart snapshot into a payment session.
pub trait CheckoutCollaborator {
    /// Whatever the collaborator hands back, e.g. a session id or redirect URL.
    type Session;

    /// Collaborator failure
    type Error: std::error::Error + 'static;

    /// Start a checkout for `snapshot`.
    ///
    /// # Errors
    ///
    /// Returns the collaborator's own error if no session could be created.
    fn begin_checkout(&mut self, snapshot: &CheckoutSnapshot) -> Result<Self::Session, Self::Error>;
}

/// One line item as sent to the collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutLine {
    /// Line identity, serialized structurally so it stays unique within the snapshot
    pub key: LineKey,

    /// Product name
    pub name: String,

    /// Variant or attributes, e.g. `Color: red, Size: M`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Unit price in minor units
    pub unit_amount: i64,

    /// Units on the line
    pub quantity: u32,
}

impl From<&CartLine> for CheckoutLine {
    fn from(line: &CartLine) -> Self {
        let snapshot = line.snapshot();

        let description = snapshot
            .variant_name()
            .map(str::to_string)
            .or_else(|| line.key().selection().describe());

        Self {
            key: line.key().clone(),
            name: snapshot.name().to_string(),
            description,
            unit_amount: line.unit_price().to_minor_units(),
            quantity: line.quantity().get(),
        }
    }
}

/// Read-only view of a cart at the moment of checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutSnapshot {
    currency: &'static str,
    lines: Vec<CheckoutLine>,
    subtotal: i64,
    tax: i64,
    shipping: i64,
    discount: i64,
    total: i64,
}

impl From<&Cart> for CheckoutSnapshot {
    fn from(cart: &Cart) -> Self {
        let totals = cart.totals();

        Self {
            currency: cart.currency().iso_alpha_code,
            lines: cart.lines().iter().map(CheckoutLine::from).collect(),
            subtotal: totals.subtotal().to_minor_units(),
            tax: totals.tax().to_minor_units(),
            shipping: totals.shipping().to_minor_units(),
            discount: totals.discount().to_minor_units(),
            total: totals.total().to_minor_units(),
        }
    }
}

impl CheckoutSnapshot {
    /// ISO 4217 code of every amount
    pub fn currency(&self) -> &'static str {
        self.currency
    }

    /// Line items in cart order
    pub fn lines(&self) -> &[CheckoutLine] {
        &self.lines
    }

    /// Subtotal in minor units
    pub fn subtotal(&self) -> i64 {
        self.subtotal
    }

    /// Tax in minor units
    pub fn tax(&self) -> i64 {
        self.tax
    }

    /// Shipping in minor units
    pub fn shipping(&self) -> i64 {
        self.shipping
    }

    /// Discount in minor units
    pub fn discount(&self) -> i64 {
        self.discount
    }

    /// Amount to charge in minor units
    pub fn total(&self) -> i64 {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::USD};
    use testresult::TestResult;

    use crate::{
        cart::line::LineSelection,
        pricing::PricingPolicy,
        products::{Product, ProductId, ProductVariant, VariantId},
    };

    fn key(selection: LineSelection) -> LineKey {
        LineKey::new(ProductId::from("dress"), selection)
    }

    use super::*;

    fn dress() -> Product {
        Product {
            id: ProductId::from("dress"),
            name: "Summer Dress".to_string(),
            category: "summer".to_string(),
            image: None,
            price: Money::from_minor(30_00, USD),
            variants: vec![ProductVariant {
                id: VariantId::from("dress-l"),
                product_id: ProductId::from("dress"),
                name: "Large".to_string(),
                size: Some("L".to_string()),
                color: None,
                price: None,
                image: None,
                inventory_quantity: 3,
            }],
        }
    }

    #[test]
    fn snapshot_carries_lines_and_totals() -> TestResult {
        let mut cart = Cart::new(PricingPolicy::default());
        let product = dress();

        cart.add_selection(
            &product,
            LineSelection::attributes([("size", "M"), ("color", "red")]),
            2,
        )?;
        cart.add_item(&product, product.variants.first(), 1)?;

        let snapshot = CheckoutSnapshot::from(&cart);

        assert_eq!(snapshot.currency(), "USD");
        assert_eq!(
            snapshot.lines(),
            [
                CheckoutLine {
                    key: key(LineSelection::attributes([("size", "M"), ("color", "red")])),
                    name: "Summer Dress".to_string(),
                    description: Some("Color: red, Size: M".to_string()),
                    unit_amount: 30_00,
                    quantity: 2,
                },
                CheckoutLine {
                    key: key(LineSelection::Variant(VariantId::from("dress-l"))),
                    name: "Summer Dress".to_string(),
                    description: Some("Large".to_string()),
                    unit_amount: 30_00,
                    quantity: 1,
                },
            ]
        );
        assert_eq!(snapshot.subtotal(), 90_00);
        assert_eq!(snapshot.tax(), 7_20);
        assert_eq!(snapshot.shipping(), 10_00);
        assert_eq!(snapshot.total(), 107_20);

        Ok(())
    }

    #[test]
    fn lines_with_matching_attribute_values_keep_distinct_keys() -> TestResult {
        let mut cart = Cart::new(PricingPolicy::default());
        let product = dress();

        cart.add_selection(&product, LineSelection::attributes([("size", "M")]), 1)?;
        cart.add_selection(&product, LineSelection::attributes([("color", "M")]), 1)?;

        let snapshot = CheckoutSnapshot::from(&cart);
        let [first, second] = snapshot.lines() else {
            return Err("expected two lines".into());
        };

        assert_ne!(first.key, second.key);

        let json = serde_json::to_value(&snapshot)?;

        assert_ne!(json["lines"][0]["key"], json["lines"][1]["key"]);
        assert_eq!(json["lines"][0]["key"]["product_id"], "dress");
        assert_eq!(
            json["lines"][0]["key"]["selection"]["value"][0]["name"],
            "size"
        );

        Ok(())
    }
}
