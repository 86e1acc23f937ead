//! Catalog
//!
//! The cart only talks to the catalog while an item is being added, to capture a snapshot.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::products::{Product, ProductId, ProductVariant, VariantId};

/// Catalog lookup errors.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    /// No product with this identifier.
    #[error("product not found: {0}")]
    ProductNotFound(ProductId),

    /// No variant with this identifier.
    #[error("variant not found: {0}")]
    VariantNotFound(VariantId),
}

/// Source of product and variant records.
pub trait Catalog {
    /// Look up a product by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ProductNotFound`] if the product does not exist.
    fn lookup_product(&self, id: &ProductId) -> Result<&Product, CatalogError>;

    /// Look up a variant, and the product that owns it, by variant identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::VariantNotFound`] if the variant does not exist.
    fn lookup_variant(&self, id: &VariantId) -> Result<(&Product, &ProductVariant), CatalogError>;
}

/// Catalog held entirely in memory.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCatalog {
    products: FxHashMap<ProductId, Product>,
    variants: FxHashMap<VariantId, ProductId>,
}

impl InMemoryCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a product and index its variants.
    pub fn insert(&mut self, product: Product) {
        if let Some(previous) = self.products.get(&product.id) {
            for variant in &previous.variants {
                self.variants.remove(&variant.id);
            }
        }

        for variant in &product.variants {
            self.variants.insert(variant.id.clone(), product.id.clone());
        }

        self.products.insert(product.id.clone(), product);
    }

    /// Number of products in the catalog
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog has no products
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Iterate over all products, in no particular order.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }
}

impl FromIterator<Product> for InMemoryCatalog {
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        let mut catalog = Self::new();

        for product in iter {
            catalog.insert(product);
        }

        catalog
    }
}

impl Catalog for InMemoryCatalog {
    fn lookup_product(&self, id: &ProductId) -> Result<&Product, CatalogError> {
        self.products
            .get(id)
            .ok_or_else(|| CatalogError::ProductNotFound(id.clone()))
    }

    fn lookup_variant(&self, id: &VariantId) -> Result<(&Product, &ProductVariant), CatalogError> {
        let not_found = || CatalogError::VariantNotFound(id.clone());

        let product = self
            .variants
            .get(id)
            .and_then(|product_id| self.products.get(product_id))
            .ok_or_else(not_found)?;

        let variant = product.variant(id).ok_or_else(not_found)?;

        Ok((product, variant))
    }
}
