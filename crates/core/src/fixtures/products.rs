//! Product Fixtures

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Findable, Money, iso::Currency};
use serde::Deserialize;

use crate::{
    fixtures::FixtureError,
    products::{Product, ProductId, ProductVariant, VariantId},
};

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product name
    pub name: String,

    /// Product category
    pub category: String,

    /// Product image
    #[serde(default)]
    pub image: Option<String>,

    /// Product price (e.g., "89.00 USD")
    pub price: String,

    /// Product variants
    #[serde(default)]
    pub variants: Vec<VariantFixture>,
}

/// Variant Fixture
#[derive(Debug, Deserialize)]
pub struct VariantFixture {
    /// Variant id
    pub id: String,

    /// Variant name
    pub name: String,

    /// Size attribute
    #[serde(default)]
    pub size: Option<String>,

    /// Colour attribute
    #[serde(default)]
    pub color: Option<String>,

    /// Variant price, when it differs from the product
    #[serde(default)]
    pub price: Option<String>,

    /// Variant image
    #[serde(default)]
    pub image: Option<String>,

    /// Units in stock
    #[serde(default)]
    pub inventory: u32,
}

impl ProductFixture {
    /// Convert the fixture into a product with the given id.
    ///
    /// # Errors
    ///
    /// Returns an error if a price cannot be parsed or a variant is priced in a different
    /// currency to the product.
    pub fn into_product(self, id: String) -> Result<Product, FixtureError> {
        let (minor_units, currency) = parse_price(&self.price)?;
        let product_id = ProductId::from(id);

        let variants = self
            .variants
            .into_iter()
            .map(|variant| variant.into_variant(&product_id, currency))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Product {
            id: product_id,
            name: self.name,
            category: self.category,
            image: self.image,
            price: Money::from_minor(minor_units, currency),
            variants,
        })
    }
}

impl VariantFixture {
    fn into_variant(
        self,
        product_id: &ProductId,
        currency: &'static Currency,
    ) -> Result<ProductVariant, FixtureError> {
        let price = self
            .price
            .as_deref()
            .map(parse_price)
            .transpose()?
            .map(|(minor_units, variant_currency)| {
                if variant_currency == currency {
                    Ok(Money::from_minor(minor_units, currency))
                } else {
                    Err(FixtureError::CurrencyMismatch(
                        currency.iso_alpha_code.to_string(),
                        variant_currency.iso_alpha_code.to_string(),
                    ))
                }
            })
            .transpose()?;

        Ok(ProductVariant {
            id: VariantId::from(self.id),
            product_id: product_id.clone(),
            name: self.name,
            size: self.size,
            color: self.color,
            price,
            image: self.image,
            inventory_quantity: self.inventory,
        })
    }
}

/// Parse price string (e.g., "2.99 USD") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, if the currency code
/// is not recognized, or if the amount is negative.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    if parts.len() != 2 {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    }

    let currency_code = parts
        .get(1)
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = Currency::find(currency_code)
        .ok_or_else(|| FixtureError::UnknownCurrency((*currency_code).to_string()))?;

    let amount = parts
        .first()
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let minor_units = parse_amount(amount, currency)?;

    if minor_units < 0 {
        return Err(FixtureError::NegativePrice(s.to_string()));
    }

    Ok((minor_units, currency))
}

/// Parse a bare amount (e.g., "10.00") into minor units of `currency`
///
/// Sub-minor digits round half away from zero, the same as tax. The sign is kept; callers decide
/// whether a negative amount makes sense.
///
/// # Errors
///
/// Returns [`FixtureError::InvalidPrice`] if the amount is not a decimal number or does not fit
/// in minor units.
pub fn parse_amount(s: &str, currency: &'static Currency) -> Result<i64, FixtureError> {
    let amount = s
        .trim()
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let scale = 10_i64
        .checked_pow(currency.exponent)
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    amount
        .checked_mul(Decimal::from(scale))
        .and_then(|value| {
            value
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_i64()
        })
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))
}

/// Parse percentage string (e.g., "8%" or "0.08") into a `Percentage`
///
/// Accepts two formats:
/// - Percentage format: "8%" for 8%
/// - Decimal format: "0.08" for 8%
///
/// # Errors
///
/// Returns an error if the string cannot be parsed.
pub fn parse_percentage(s: &str) -> Result<Percentage, FixtureError> {
    let trimmed = s.trim();

    if let Some(percent_str) = trimmed.strip_suffix('%') {
        let value = percent_str
            .trim()
            .parse::<Decimal>()
            .map_err(|_err| FixtureError::InvalidPercentage(s.to_string()))?;

        Ok(Percentage::from(value / Decimal::ONE_HUNDRED))
    } else {
        let value = trimmed
            .parse::<Decimal>()
            .map_err(|_err| FixtureError::InvalidPercentage(s.to_string()))?;

        Ok(Percentage::from(value))
    }
}
