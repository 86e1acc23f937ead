//! Products

use std::fmt;

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};

macro_rules! new_id_type {
    ($(#[$meta:meta])* $vis:vis struct $name:ident;) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        $vis struct $name(String);

        impl $name {
            /// Create an identifier from anything string-like.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

new_id_type! {
    /// Product identifier, as issued by the catalog.
    pub struct ProductId;
}

new_id_type! {
    /// Variant (SKU) identifier, as issued by the catalog.
    pub struct VariantId;
}

/// Product
#[derive(Debug, Clone)]
pub struct Product {
    /// Product identifier
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Product category
    pub category: String,

    /// Primary product image
    pub image: Option<String>,

    /// Product price
    pub price: Money<'static, Currency>,

    /// Purchasable variants; empty when the product is sold as a single SKU.
    pub variants: Vec<ProductVariant>,
}

impl Product {
    /// Find one of this product's variants by identifier.
    pub fn variant(&self, id: &VariantId) -> Option<&ProductVariant> {
        self.variants.iter().find(|variant| &variant.id == id)
    }
}

/// Product Variant
#[derive(Debug, Clone)]
pub struct ProductVariant {
    /// Variant identifier
    pub id: VariantId,

    /// Owning product
    pub product_id: ProductId,

    /// Variant name (e.g. "Medium / Red")
    pub name: String,

    /// Size attribute
    pub size: Option<String>,

    /// Colour attribute
    pub color: Option<String>,

    /// Variant price; falls back to the product price when absent.
    pub price: Option<Money<'static, Currency>>,

    /// Variant-specific image
    pub image: Option<String>,

    /// Units available to sell
    pub inventory_quantity: u32,
}

impl ProductVariant {
    /// The price a customer pays for this variant of `product`.
    pub fn effective_price(&self, product: &Product) -> Money<'static, Currency> {
        self.price.unwrap_or(product.price)
    }
}

/// Immutable copy of the catalog data a cart line was created from.
///
/// The cart keeps showing this data even if the catalog changes later.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSnapshot {
    product_id: ProductId,
    name: String,
    category: String,
    image: Option<String>,
    variant_name: Option<String>,
    unit_price: Money<'static, Currency>,
}

impl ProductSnapshot {
    /// Build a snapshot from its parts.
    pub fn new(
        product_id: ProductId,
        name: impl Into<String>,
        category: impl Into<String>,
        image: Option<String>,
        variant_name: Option<String>,
        unit_price: Money<'static, Currency>,
    ) -> Self {
        Self {
            product_id,
            name: name.into(),
            category: category.into(),
            image,
            variant_name,
            unit_price,
        }
    }

    /// Capture the current catalog data for a product and optional variant.
    pub fn capture(product: &Product, variant: Option<&ProductVariant>) -> Self {
        let unit_price = variant.map_or(product.price, |variant| variant.effective_price(product));
        let image = variant
            .and_then(|variant| variant.image.clone())
            .or_else(|| product.image.clone());

        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            image,
            variant_name: variant.map(|variant| variant.name.clone()),
            unit_price,
        }
    }

    /// Product identifier
    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    /// Product name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Product category
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Image shown for the line
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Variant name, if the line was added for a catalog variant
    pub fn variant_name(&self) -> Option<&str> {
        self.variant_name.as_deref()
    }

    /// Unit price at the time the line was created
    pub fn unit_price(&self) -> Money<'static, Currency> {
        self.unit_price
    }
}
