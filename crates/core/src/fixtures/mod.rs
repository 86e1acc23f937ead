//! Fixtures
//!
//! YAML catalog files, used by the CLI and by tests.
//!
//! ```yaml
//! products:
//!   linen-dress:
//!     name: Linen Dress
//!     category: summer
//!     price: "89.00 USD"
//!     variants:
//!       - id: linen-dress-m
//!         name: Medium
//!         size: M
//! ```

use std::{fs, path::Path};

use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;

use crate::{catalog::InMemoryCatalog, fixtures::products::ProductFixture, products::Product};

pub mod products;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Catalog prices are never negative
    #[error("Negative price: {0}")]
    NegativePrice(String),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between a product and one of its variants
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),
}

/// Wrapper for a catalog in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Map of product id -> product fixture
    pub products: FxHashMap<String, ProductFixture>,
}

impl CatalogFixture {
    /// Parse a catalog from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Yaml`] if the text is not a valid catalog.
    pub fn from_yaml(yaml: &str) -> Result<Self, FixtureError> {
        Ok(serde_norway::from_str(yaml)?)
    }

    /// Read and parse a catalog file.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Io`] if the file cannot be read, or [`FixtureError::Yaml`] if it
    /// is not a valid catalog.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        Self::from_yaml(&fs::read_to_string(path)?)
    }

    /// Load a named catalog from `./fixtures/catalogs/{name}.yml`.
    ///
    /// # Errors
    ///
    /// See [`CatalogFixture::from_path`].
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        Self::from_path(
            Path::new("./fixtures")
                .join("catalogs")
                .join(format!("{name}.yml")),
        )
    }

    /// Convert every product fixture into a catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if a price cannot be parsed or a variant is priced in a different
    /// currency to its product.
    pub fn into_catalog(self) -> Result<InMemoryCatalog, FixtureError> {
        self.products
            .into_iter()
            .map(|(id, fixture)| fixture.into_product(id))
            .collect::<Result<Vec<Product>, _>>()
            .map(InMemoryCatalog::from_iter)
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::USD};
    use testresult::TestResult;

    use crate::{
        catalog::Catalog,
        products::{ProductId, VariantId},
    };

    use super::*;

    const CATALOG: &str = r#"
products:
  linen-dress:
    name: Linen Dress
    category: summer
    image: linen-dress.jpg
    price: "89.00 USD"
    variants:
      - id: linen-dress-m
        name: Medium
        size: M
        inventory: 4
      - id: linen-dress-xl
        name: Extra Large
        size: XL
        price: "95.00 USD"
  silk-scarf:
    name: Silk Scarf
    category: evening
    price: "24.50 USD"
"#;

    #[test]
    fn catalog_from_yaml() -> TestResult {
        let catalog = CatalogFixture::from_yaml(CATALOG)?.into_catalog()?;

        let scarf = catalog.lookup_product(&ProductId::from("silk-scarf"))?;
        let (dress, xl) = catalog.lookup_variant(&VariantId::from("linen-dress-xl"))?;

        assert_eq!(catalog.len(), 2);
        assert_eq!(scarf.price, Money::from_minor(24_50, USD));
        assert!(scarf.variants.is_empty());
        assert_eq!(dress.name, "Linen Dress");
        assert_eq!(dress.image.as_deref(), Some("linen-dress.jpg"));
        assert_eq!(xl.price, Some(Money::from_minor(95_00, USD)));
        assert_eq!(xl.product_id, dress.id);

        Ok(())
    }

    #[test]
    fn invalid_yaml_errors() {
        let result = CatalogFixture::from_yaml("products: [");

        assert!(matches!(result, Err(FixtureError::Yaml(_))));
    }

    #[test]
    fn missing_file_errors() {
        let result = CatalogFixture::from_path("./fixtures/does-not-exist.yml");

        assert!(matches!(result, Err(FixtureError::Io(_))));
    }

    #[test]
    fn variant_in_other_currency_errors() -> TestResult {
        let yaml = r#"
products:
  cap:
    name: Cap
    category: casual
    price: "10.00 USD"
    variants:
      - id: cap-red
        name: Red
        price: "9.00 GBP"
"#;

        let result = CatalogFixture::from_yaml(yaml)?.into_catalog();

        assert!(matches!(result, Err(FixtureError::CurrencyMismatch(..))));

        Ok(())
    }

    #[test]
    fn negative_variant_price_errors() -> TestResult {
        let yaml = r#"
products:
  cap:
    name: Cap
    category: casual
    price: "10.00 USD"
    variants:
      - id: cap-refund
        name: Refund
        price: "-10.00 USD"
"#;

        let result = CatalogFixture::from_yaml(yaml)?.into_catalog();

        assert!(matches!(
            result,
            Err(FixtureError::NegativePrice(price)) if price == "-10.00 USD"
        ));

        Ok(())
    }
}
