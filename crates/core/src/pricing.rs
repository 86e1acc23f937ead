//! Pricing

use std::num::NonZeroU32;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{
    Money, MoneyError,
    iso::{self, Currency},
};
use thiserror::Error;

use crate::{
    cart::line::CartLine,
    discounts::{DiscountError, percent_of_minor},
};

/// Errors that can occur while pricing a cart.
#[derive(Debug, Error)]
pub enum PricingError {
    /// A line or cart amount does not fit in minor units.
    #[error("amount overflowed while pricing the cart")]
    Overflow,

    /// A policy amount is in a different currency to the policy itself.
    #[error("pricing policy is in {expected}, but an amount is in {found}")]
    CurrencyMismatch {
        /// Policy currency
        expected: &'static str,
        /// Offending amount currency
        found: &'static str,
    },

    /// Thresholds and shipping costs are never negative.
    #[error("pricing policy amounts must not be negative")]
    NegativeAmount,

    /// Tax is never a credit.
    #[error("tax rate must not be negative")]
    NegativeRate,

    /// Tax could not be calculated.
    #[error(transparent)]
    Tax(#[from] DiscountError),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// The fixed policy used to derive tax and shipping from a subtotal.
#[derive(Debug, Clone, Copy)]
pub struct PricingPolicy {
    currency: &'static Currency,
    tax_rate: Percentage,
    free_shipping_threshold: Money<'static, Currency>,
    shipping_cost: Money<'static, Currency>,
}

impl PricingPolicy {
    /// Create a new pricing policy.
    ///
    /// # Errors
    ///
    /// - [`PricingError::CurrencyMismatch`]: the threshold or shipping cost is not in `currency`.
    /// - [`PricingError::NegativeAmount`]: the threshold or shipping cost is negative.
    /// - [`PricingError::NegativeRate`]: the tax rate is negative.
    pub fn new(
        currency: &'static Currency,
        tax_rate: Percentage,
        free_shipping_threshold: Money<'static, Currency>,
        shipping_cost: Money<'static, Currency>,
    ) -> Result<Self, PricingError> {
        if tax_rate * Decimal::ONE < Decimal::ZERO {
            return Err(PricingError::NegativeRate);
        }

        for amount in [&free_shipping_threshold, &shipping_cost] {
            if amount.currency() != currency {
                return Err(PricingError::CurrencyMismatch {
                    expected: currency.iso_alpha_code,
                    found: amount.currency().iso_alpha_code,
                });
            }

            if amount.to_minor_units() < 0 {
                return Err(PricingError::NegativeAmount);
            }
        }

        Ok(Self {
            currency,
            tax_rate,
            free_shipping_threshold,
            shipping_cost,
        })
    }

    /// Currency every cart amount is expressed in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Tax rate applied to the subtotal.
    pub fn tax_rate(&self) -> Percentage {
        self.tax_rate
    }

    /// Subtotal at or above which shipping is free.
    pub fn free_shipping_threshold(&self) -> Money<'static, Currency> {
        self.free_shipping_threshold
    }

    /// Flat shipping cost charged below the free shipping threshold.
    pub fn shipping_cost(&self) -> Money<'static, Currency> {
        self.shipping_cost
    }

    /// Zero in the policy currency.
    pub fn zero(&self) -> Money<'static, Currency> {
        Money::from_minor(0, self.currency)
    }

    /// Tax owed on a subtotal, rounded to the nearest minor unit.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Tax`] if the percentage cannot be applied in minor units.
    pub fn tax_on(
        &self,
        subtotal: &Money<'static, Currency>,
    ) -> Result<Money<'static, Currency>, PricingError> {
        let tax = percent_of_minor(&self.tax_rate, subtotal.to_minor_units())?;

        Ok(Money::from_minor(tax, self.currency))
    }

    /// Shipping owed for a subtotal.
    ///
    /// Nothing ships from an empty cart, so `has_lines == false` is always free.
    pub fn shipping_for(
        &self,
        subtotal: &Money<'static, Currency>,
        has_lines: bool,
    ) -> Money<'static, Currency> {
        if !has_lines
            || subtotal.to_minor_units() >= self.free_shipping_threshold.to_minor_units()
        {
            self.zero()
        } else {
            self.shipping_cost
        }
    }
}

impl Default for PricingPolicy {
    /// 8% tax, free shipping from $100.00, otherwise $10.00.
    fn default() -> Self {
        Self {
            currency: iso::USD,
            tax_rate: Percentage::from(Decimal::new(8, 2)),
            free_shipping_threshold: Money::from_minor(100_00, iso::USD),
            shipping_cost: Money::from_minor(10_00, iso::USD),
        }
    }
}

/// Unit price multiplied by quantity.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the result does not fit in minor units.
pub fn line_total(
    unit_price: &Money<'static, Currency>,
    quantity: NonZeroU32,
) -> Result<Money<'static, Currency>, PricingError> {
    let minor = unit_price
        .to_minor_units()
        .checked_mul(i64::from(quantity.get()))
        .ok_or(PricingError::Overflow)?;

    Ok(Money::from_minor(minor, unit_price.currency()))
}

/// Calculates the subtotal of a list of cart lines.
///
/// # Errors
///
/// - [`PricingError::Overflow`]: a line total does not fit in minor units.
/// - [`PricingError::Money`]: a line is priced in another currency.
pub fn total_price(
    lines: &[CartLine],
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, PricingError> {
    lines
        .iter()
        .try_fold(Money::from_minor(0, currency), |acc, line| {
            let total = line_total(&line.unit_price(), line.quantity())?;

            Ok(acc.add(total)?)
        })
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{GBP, USD};
    use testresult::TestResult;

    use super::*;

    fn usd(minor: i64) -> Money<'static, Currency> {
        Money::from_minor(minor, USD)
    }

    #[test]
    fn default_policy_matches_storefront_constants() {
        let policy = PricingPolicy::default();

        assert_eq!(policy.currency(), USD);
        assert_eq!(policy.tax_rate(), Percentage::from(Decimal::new(8, 2)));
        assert_eq!(policy.free_shipping_threshold(), usd(100_00));
        assert_eq!(policy.shipping_cost(), usd(10_00));
    }

    #[test]
    fn new_rejects_amounts_in_other_currencies() {
        let result = PricingPolicy::new(
            USD,
            Percentage::from(0.1),
            Money::from_minor(100_00, GBP),
            usd(5_00),
        );

        assert!(matches!(
            result,
            Err(PricingError::CurrencyMismatch {
                expected: "USD",
                found: "GBP"
            })
        ));
    }

    #[test]
    fn new_rejects_negative_amounts() {
        let result = PricingPolicy::new(USD, Percentage::from(0.1), usd(100_00), usd(-1));

        assert!(matches!(result, Err(PricingError::NegativeAmount)));
    }

    #[test]
    fn new_rejects_negative_tax_rate() {
        let result = PricingPolicy::new(
            USD,
            Percentage::from(Decimal::new(-8, 2)),
            usd(100_00),
            usd(10_00),
        );

        assert!(matches!(result, Err(PricingError::NegativeRate)));
    }

    #[test]
    fn zero_tax_rate_is_allowed() -> TestResult {
        let policy = PricingPolicy::new(
            USD,
            Percentage::from(Decimal::ZERO),
            usd(100_00),
            usd(10_00),
        )?;

        assert_eq!(policy.tax_on(&usd(50_00))?, usd(0));

        Ok(())
    }

    #[test]
    fn tax_on_subtotal() -> TestResult {
        let policy = PricingPolicy::default();

        assert_eq!(policy.tax_on(&usd(50_00))?, usd(4_00));
        assert_eq!(policy.tax_on(&usd(120_00))?, usd(9_60));
        assert_eq!(policy.tax_on(&usd(0))?, usd(0));

        Ok(())
    }

    #[test]
    fn shipping_charged_below_threshold() {
        let policy = PricingPolicy::default();

        assert_eq!(policy.shipping_for(&usd(99_99), true), usd(10_00));
    }

    #[test]
    fn shipping_free_at_threshold() {
        let policy = PricingPolicy::default();

        assert_eq!(policy.shipping_for(&usd(100_00), true), usd(0));
        assert_eq!(policy.shipping_for(&usd(120_00), true), usd(0));
    }

    #[test]
    fn shipping_free_for_empty_cart() {
        let policy = PricingPolicy::default();

        assert_eq!(policy.shipping_for(&usd(0), false), usd(0));
    }

    #[test]
    fn line_total_multiplies_by_quantity() -> TestResult {
        let quantity = NonZeroU32::new(3).ok_or("zero quantity")?;

        assert_eq!(line_total(&usd(12_50), quantity)?, usd(37_50));

        Ok(())
    }

    #[test]
    fn line_total_overflow_errors() {
        let result = line_total(&usd(i64::MAX), NonZeroU32::MAX);

        assert!(matches!(result, Err(PricingError::Overflow)));
    }

    #[test]
    fn total_price_of_no_lines_is_zero() -> TestResult {
        assert_eq!(total_price(&[], USD)?, usd(0));

        Ok(())
    }
}
