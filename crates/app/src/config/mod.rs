//! Application configuration
//!
//! Every option can also be set from the environment, after an optional `.env` file is loaded.

use clap::Args;

use crate::config::{
    catalog::CatalogConfig, observability::LoggingConfig, pricing::PricingConfig,
    storage::StorageConfig,
};

pub mod catalog;
pub mod observability;
pub mod pricing;
pub mod storage;

/// Settings shared by every subcommand.
#[derive(Debug, Args)]
pub struct AppConfig {
    /// Pricing policy settings.
    #[command(flatten)]
    pub pricing: PricingConfig,

    /// Cart storage settings.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Product catalog settings.
    #[command(flatten)]
    pub catalog: CatalogConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}
