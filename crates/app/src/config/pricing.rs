//! Pricing Config

use clap::Args;
use rusty_money::{Findable, Money, iso::Currency};
use trolley::{
    fixtures::products::{parse_amount, parse_percentage},
    pricing::PricingPolicy,
};

use crate::errors::ConfigError;

/// Pricing policy settings.
#[derive(Debug, Args)]
pub struct PricingConfig {
    /// ISO 4217 code of the cart currency
    #[arg(long, global = true, env = "TROLLEY_CURRENCY", default_value = "USD")]
    pub currency: String,

    /// Tax rate applied to the subtotal ("8%" or "0.08")
    #[arg(long, global = true, env = "TROLLEY_TAX_RATE", default_value = "8%")]
    pub tax_rate: String,

    /// Subtotal at or above which shipping is free
    #[arg(
        long,
        global = true,
        env = "TROLLEY_FREE_SHIPPING_THRESHOLD",
        default_value = "100.00"
    )]
    pub free_shipping_threshold: String,

    /// Flat shipping cost below the free shipping threshold
    #[arg(long, global = true, env = "TROLLEY_SHIPPING_COST", default_value = "10.00")]
    pub shipping_cost: String,
}

impl PricingConfig {
    /// Currency named by the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownCurrency`] if the code is not an ISO 4217 currency.
    pub fn currency(&self) -> Result<&'static Currency, ConfigError> {
        Currency::find(self.currency.trim())
            .ok_or_else(|| ConfigError::UnknownCurrency(self.currency.clone()))
    }

    /// Build the pricing policy.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if an amount, the rate or the currency cannot be parsed, or
    /// the resulting policy is invalid.
    pub fn policy(&self) -> Result<PricingPolicy, ConfigError> {
        let currency = self.currency()?;

        let threshold = parse_amount(&self.free_shipping_threshold, currency)?;
        let shipping = parse_amount(&self.shipping_cost, currency)?;

        Ok(PricingPolicy::new(
            currency,
            parse_percentage(&self.tax_rate)?,
            Money::from_minor(threshold, currency),
            Money::from_minor(shipping, currency),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{EUR, USD};
    use testresult::TestResult;
    use trolley::pricing::PricingError;

    use super::*;

    fn config(currency: &str, tax_rate: &str, threshold: &str, shipping: &str) -> PricingConfig {
        PricingConfig {
            currency: currency.to_string(),
            tax_rate: tax_rate.to_string(),
            free_shipping_threshold: threshold.to_string(),
            shipping_cost: shipping.to_string(),
        }
    }

    #[test]
    fn defaults_match_the_library_policy() -> TestResult {
        let policy = config("USD", "8%", "100.00", "10.00").policy()?;
        let default = PricingPolicy::default();

        assert_eq!(policy.currency(), USD);
        assert_eq!(policy.tax_rate(), default.tax_rate());
        assert_eq!(policy.free_shipping_threshold(), default.free_shipping_threshold());
        assert_eq!(policy.shipping_cost(), default.shipping_cost());

        Ok(())
    }

    #[test]
    fn other_currencies_are_supported() -> TestResult {
        let policy = config("EUR", "0.2", "50", "4.95").policy()?;

        assert_eq!(policy.currency(), EUR);
        assert_eq!(policy.shipping_cost(), Money::from_minor(4_95, EUR));

        Ok(())
    }

    #[test]
    fn unknown_currency_is_rejected() {
        let result = config("ZZZ", "8%", "100.00", "10.00").policy();

        assert!(matches!(result, Err(ConfigError::UnknownCurrency(code)) if code == "ZZZ"));
    }

    #[test]
    fn negative_shipping_is_rejected() {
        let result = config("USD", "8%", "100.00", "-1.00").policy();

        assert!(matches!(result, Err(ConfigError::Pricing(_))));
    }

    #[test]
    fn negative_tax_rate_is_rejected() {
        let result = config("USD", "-8%", "100.00", "10.00").policy();

        assert!(matches!(
            result,
            Err(ConfigError::Pricing(PricingError::NegativeRate))
        ));
    }
}
