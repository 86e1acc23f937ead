//! Cart Totals

use rusty_money::{Money, iso::Currency};

use crate::{
    cart::line::CartLine,
    pricing::{PricingError, PricingPolicy, total_price},
};

/// Monetary fields derived from the cart lines, the discount and the pricing policy.
///
/// Always recomputed as a whole; no field can be set on its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartTotals {
    subtotal: Money<'static, Currency>,
    tax: Money<'static, Currency>,
    shipping: Money<'static, Currency>,
    discount: Money<'static, Currency>,
    total: Money<'static, Currency>,
}

impl CartTotals {
    /// Totals of an empty cart.
    pub fn zero(currency: &'static Currency) -> Self {
        let zero = Money::from_minor(0, currency);

        Self {
            subtotal: zero,
            tax: zero,
            shipping: zero,
            discount: zero,
            total: zero,
        }
    }

    /// Derive totals for a set of lines.
    ///
    /// `total = subtotal + tax + shipping - discount`, clamped at zero.
    ///
    /// # Errors
    ///
    /// - [`PricingError::Overflow`]: an amount does not fit in minor units.
    /// - [`PricingError::Money`]: a line or the discount is in another currency.
    /// - [`PricingError::Tax`]: the tax rate cannot be applied.
    pub fn compute(
        lines: &[CartLine],
        discount: Money<'static, Currency>,
        policy: &PricingPolicy,
    ) -> Result<Self, PricingError> {
        let subtotal = total_price(lines, policy.currency())?;
        let tax = policy.tax_on(&subtotal)?;
        let shipping = policy.shipping_for(&subtotal, !lines.is_empty());

        let gross = subtotal.add(tax)?.add(shipping)?;
        let total = gross.sub(discount)?;

        let total = if total.to_minor_units() < 0 {
            policy.zero()
        } else {
            total
        };

        Ok(Self {
            subtotal,
            tax,
            shipping,
            discount,
            total,
        })
    }

    /// Sum of unit price multiplied by quantity over all lines
    pub fn subtotal(&self) -> Money<'static, Currency> {
        self.subtotal
    }

    /// Tax on the subtotal
    pub fn tax(&self) -> Money<'static, Currency> {
        self.tax
    }

    /// Shipping charge
    pub fn shipping(&self) -> Money<'static, Currency> {
        self.shipping
    }

    /// Discount granted by a promotion
    pub fn discount(&self) -> Money<'static, Currency> {
        self.discount
    }

    /// Amount owed; never negative
    pub fn total(&self) -> Money<'static, Currency> {
        self.total
    }
}
