//! Persisted Records
//!
//! Serde shapes for the persisted envelope. Domain types stay free of serialization concerns;
//! conversion happens here in both directions.

use std::num::NonZeroU32;

use rusty_money::{Findable, Money, iso::Currency};
use serde::{Deserialize, Serialize};

use crate::{
    cart::{
        Cart,
        line::{CartLine, LineKey},
    },
    persistence::CodecError,
    pricing::PricingPolicy,
    products::{ProductId, ProductSnapshot},
};

/// Envelope version written by this build.
pub const CURRENT_VERSION: u32 = 1;

/// `{ "state": ..., "version": 1 }`
#[derive(Debug, Serialize, Deserialize)]
pub struct CartEnvelope {
    /// Persisted cart state
    pub state: CartRecord,

    /// Layout version
    pub version: u32,
}

impl From<&Cart> for CartEnvelope {
    fn from(cart: &Cart) -> Self {
        Self {
            state: CartRecord::from(cart),
            version: CURRENT_VERSION,
        }
    }
}

/// Lines and discount; everything else is derived.
#[derive(Debug, Serialize, Deserialize)]
pub struct CartRecord {
    /// Lines in insertion order
    pub lines: Vec<CartLineRecord>,

    /// Applied discount
    pub discount: MoneyRecord,
}

impl From<&Cart> for CartRecord {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart.lines().iter().map(CartLineRecord::from).collect(),
            discount: MoneyRecord::from(cart.discount()),
        }
    }
}

impl CartRecord {
    /// Rebuild a cart, deriving totals under `policy`.
    ///
    /// # Errors
    ///
    /// Returns a [`CodecError`] if an amount has an unknown currency, or the lines do not form a
    /// valid cart under `policy`.
    pub fn into_cart(self, policy: PricingPolicy) -> Result<Cart, CodecError> {
        let lines = self
            .lines
            .into_iter()
            .map(CartLineRecord::into_line)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Cart::with_lines(lines, self.discount.into_money()?, policy)?)
    }
}

/// One persisted line.
#[derive(Debug, Serialize, Deserialize)]
pub struct CartLineRecord {
    /// Line identity
    pub key: LineKey,

    /// Catalog data captured when the line was created
    pub snapshot: SnapshotRecord,

    /// Units on the line; zero is rejected while decoding.
    pub quantity: NonZeroU32,

    /// Unit price at the time the line was created
    pub unit_price: MoneyRecord,
}

impl From<&CartLine> for CartLineRecord {
    fn from(line: &CartLine) -> Self {
        let snapshot = line.snapshot();

        Self {
            key: line.key().clone(),
            snapshot: SnapshotRecord {
                product_id: snapshot.product_id().clone(),
                name: snapshot.name().to_string(),
                category: snapshot.category().to_string(),
                image: snapshot.image().map(str::to_string),
                variant_name: snapshot.variant_name().map(str::to_string),
            },
            quantity: line.quantity(),
            unit_price: MoneyRecord::from(line.unit_price()),
        }
    }
}

impl CartLineRecord {
    fn into_line(self) -> Result<CartLine, CodecError> {
        let snapshot = ProductSnapshot::new(
            self.snapshot.product_id,
            self.snapshot.name,
            self.snapshot.category,
            self.snapshot.image,
            self.snapshot.variant_name,
            self.unit_price.into_money()?,
        );

        Ok(CartLine::new(self.key.normalized(), snapshot, self.quantity))
    }
}

/// Display data of a persisted line.
#[derive(Debug, Serialize, Deserialize)]
pub struct SnapshotRecord {
    /// Product identifier
    pub product_id: ProductId,

    /// Product name
    pub name: String,

    /// Product category
    pub category: String,

    /// Image shown for the line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Variant name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_name: Option<String>,
}

/// Amount in minor units with its ISO currency code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyRecord {
    /// Minor units (e.g. cents)
    pub amount: i64,

    /// ISO 4217 alpha code
    pub currency: String,
}

impl From<Money<'static, Currency>> for MoneyRecord {
    fn from(money: Money<'static, Currency>) -> Self {
        Self {
            amount: money.to_minor_units(),
            currency: money.currency().iso_alpha_code.to_string(),
        }
    }
}

impl MoneyRecord {
    /// Convert back into money.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnknownCurrency`] if the currency code is not recognised.
    pub fn into_money(self) -> Result<Money<'static, Currency>, CodecError> {
        let currency =
            Currency::find(&self.currency).ok_or(CodecError::UnknownCurrency(self.currency))?;

        Ok(Money::from_minor(self.amount, currency))
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn money_record_keeps_minor_units_and_code() -> TestResult {
        let record = MoneyRecord::from(Money::from_minor(12_34, USD));

        assert_eq!(record.amount, 12_34);
        assert_eq!(record.currency, "USD");
        assert_eq!(record.into_money()?, Money::from_minor(12_34, USD));

        Ok(())
    }

    #[test]
    fn unknown_currency_is_rejected() {
        let record = MoneyRecord {
            amount: 1,
            currency: "XYZ".to_string(),
        };

        assert!(matches!(
            record.into_money(),
            Err(CodecError::UnknownCurrency(code)) if code == "XYZ"
        ));
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let json = r#"{
            "key": {"product_id": "p1", "selection": {"kind": "single"}},
            "snapshot": {"product_id": "p1", "name": "P1", "category": "casual"},
            "quantity": 0,
            "unit_price": {"amount": 100, "currency": "USD"}
        }"#;

        let result = serde_json::from_str::<CartLineRecord>(json);

        assert!(result.is_err());
    }

    #[test]
    fn stored_attributes_are_canonicalised() -> TestResult {
        let json = r#"{
            "key": {
                "product_id": "dress",
                "selection": {
                    "kind": "attributes",
                    "value": [
                        {"name": "Size", "value": "M"},
                        {"name": "color", "value": "red"}
                    ]
                }
            },
            "snapshot": {"product_id": "dress", "name": "Dress", "category": "summer"},
            "quantity": 2,
            "unit_price": {"amount": 3000, "currency": "USD"}
        }"#;

        let line = serde_json::from_str::<CartLineRecord>(json)?.into_line()?;

        assert_eq!(line.key().to_string(), "dress-color=red-size=M");

        Ok(())
    }
}
