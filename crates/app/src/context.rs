//! App Context

use trolley::{
    catalog::InMemoryCatalog,
    fixtures::{CatalogFixture, FixtureError},
    persistence::file::FileStorage,
    pricing::PricingPolicy,
    store::CartStore,
};

use crate::{config::AppConfig, errors::ConfigError};

/// Everything a command needs, resolved from configuration.
#[derive(Debug)]
pub struct AppContext<'a> {
    config: &'a AppConfig,
    policy: PricingPolicy,
}

impl<'a> AppContext<'a> {
    /// Resolve the pricing policy and keep the rest of the configuration for later.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the pricing settings are invalid.
    pub fn from_config(config: &'a AppConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            config,
            policy: config.pricing.policy()?,
        })
    }

    /// Pricing policy
    pub fn policy(&self) -> PricingPolicy {
        self.policy
    }

    /// Open the persisted cart. Unreadable data yields an empty cart.
    pub fn open_store(&self) -> CartStore<FileStorage> {
        CartStore::open(
            self.config.storage.storage(),
            self.config.storage.storage_key.clone(),
            self.policy,
        )
    }

    /// Load the product catalog.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if the catalog file cannot be read or parsed.
    pub fn load_catalog(&self) -> Result<InMemoryCatalog, FixtureError> {
        CatalogFixture::from_path(&self.config.catalog.catalog)?.into_catalog()
    }
}
