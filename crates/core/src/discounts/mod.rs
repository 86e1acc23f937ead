//! Discounts
//!
//! The cart never decides on promotions itself. A promotion collaborator hands it a
//! [`Discount`], which is resolved against the current subtotal into a fixed amount.

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

/// Errors specific to discount calculations.
#[derive(Debug, Error)]
pub enum DiscountError {
    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,

    /// Discounts never add to the amount owed.
    #[error("discount must not be negative")]
    Negative,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// A discount offered by a promotion.
#[derive(Debug, Copy, Clone)]
pub enum Discount {
    /// Take a percentage off the subtotal (e.g., "10% off your order")
    PercentageOff(Percentage),

    /// Take a fixed amount off the subtotal (e.g., "$5 off")
    AmountOff(Money<'static, Currency>),
}

impl Discount {
    /// Resolve the discount into an amount for the given subtotal.
    ///
    /// # Errors
    ///
    /// - [`DiscountError::PercentConversion`]: the percentage could not be applied in minor units.
    /// - [`DiscountError::Negative`]: the resolved amount is below zero.
    /// - [`DiscountError::Money`]: the fixed amount is in a different currency to the subtotal.
    pub fn amount_for(
        &self,
        subtotal: &Money<'static, Currency>,
    ) -> Result<Money<'static, Currency>, DiscountError> {
        let amount = match self {
            Discount::PercentageOff(percent) => Money::from_minor(
                percent_of_minor(percent, subtotal.to_minor_units())?,
                subtotal.currency(),
            ),
            // Adding to a zero of the subtotal's currency surfaces any currency mismatch.
            Discount::AmountOff(amount) => Money::from_minor(0, subtotal.currency()).add(*amount)?,
        };

        if amount.to_minor_units() < 0 {
            return Err(DiscountError::Negative);
        }

        Ok(amount)
    }
}

/// Calculate a percentage of a minor unit amount, rounded half away from zero.
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] if the calculation overflows or cannot be
/// represented in minor units.
pub fn percent_of_minor(percent: &Percentage, minor: i64) -> Result<i64, DiscountError> {
    let minor = Decimal::from_i64(minor).ok_or(DiscountError::PercentConversion)?;

    ((*percent) * Decimal::ONE) // decimal_percentage doesn't expose the underlying Decimal
        .checked_mul(minor)
        .ok_or(DiscountError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(DiscountError::PercentConversion)
}
