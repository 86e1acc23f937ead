//! Application Errors

use thiserror::Error;
use trolley::prelude::{
    CatalogError, CheckoutError, DiscountError, FixtureError, PricingError, StoreError,
    SummaryError,
};

use crate::checkout::HandoffError;

/// Invalid configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Currency code not known to `rusty_money`
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),

    /// An amount or rate could not be parsed.
    #[error(transparent)]
    Parse(#[from] FixtureError),

    /// The configured amounts do not form a valid policy.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Anything that can make a CLI command fail.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The catalog file could not be loaded.
    #[error("failed to load catalog: {0}")]
    Fixture(#[from] FixtureError),

    /// Unknown product or variant
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The variant does not belong to the named product.
    #[error("variant {variant} does not belong to product {product}")]
    VariantMismatch {
        /// Product named on the command line
        product: String,
        /// Variant named on the command line
        variant: String,
    },

    /// A cart operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The discount could not be resolved.
    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// Checkout failed.
    #[error(transparent)]
    Checkout(#[from] CheckoutError<HandoffError>),

    /// The summary could not be rendered.
    #[error(transparent)]
    Summary(#[from] SummaryError),

    /// JSON output failed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Writing output failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
