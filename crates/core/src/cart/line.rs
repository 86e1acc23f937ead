//! Cart Lines

use std::{fmt, num::NonZeroU32};

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{
    cart::CartError,
    pricing::{PricingError, line_total},
    products::{Product, ProductId, ProductSnapshot, ProductVariant, VariantId},
};

/// A free-form product attribute picked by the customer, such as size or colour.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attribute {
    name: String,
    value: String,
}

impl Attribute {
    /// Create a new attribute. Names are case-insensitive and stored lowercase.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_lowercase(),
            value: value.into(),
        }
    }

    /// Attribute name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute value
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// How a line picks a purchasable thing out of a product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum LineSelection {
    /// The product is sold as a single SKU.
    Single,

    /// An explicit catalog variant.
    Variant(VariantId),

    /// Free-form attributes, for catalogs without a SKU model.
    ///
    /// Kept sorted by attribute name so selection order never changes identity.
    Attributes(SmallVec<[Attribute; 2]>),
}

impl LineSelection {
    /// Build an attribute selection from name/value pairs.
    ///
    /// Attributes are sorted by name; when a name repeats, the first value wins. An empty set
    /// of attributes selects the product itself.
    pub fn attributes<N, V>(pairs: impl IntoIterator<Item = (N, V)>) -> Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        let mut attributes = pairs
            .into_iter()
            .map(|(name, value)| Attribute::new(name, value))
            .collect::<SmallVec<[Attribute; 2]>>();

        attributes.sort_by(|a, b| a.name.cmp(&b.name));
        attributes.dedup_by(|a, b| a.name == b.name);

        if attributes.is_empty() {
            LineSelection::Single
        } else {
            LineSelection::Attributes(attributes)
        }
    }

    /// Human-readable description of the selection, e.g. `Color: red, Size: M`.
    pub fn describe(&self) -> Option<String> {
        match self {
            LineSelection::Single => None,
            LineSelection::Variant(id) => Some(format!("Variant: {id}")),
            LineSelection::Attributes(attributes) => Some(
                attributes
                    .iter()
                    .map(|attribute| format!("{}: {}", title_case(&attribute.name), attribute.value))
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
        }
    }
}

fn title_case(name: &str) -> String {
    let mut chars = name.chars();

    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Identity of a cart line: the product plus the selection within it.
///
/// Adding an item whose key matches an existing line merges into that line. Equality is
/// structural; the [`fmt::Display`] form is for logs and people, and two keys can render alike when
/// ids contain `-`. Serialize the key itself wherever it has to be unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey {
    product_id: ProductId,
    selection: LineSelection,
}

impl LineKey {
    /// Create a line key.
    pub fn new(product_id: ProductId, selection: LineSelection) -> Self {
        Self {
            product_id,
            selection,
        }
    }

    /// Derive the key for a product and optional catalog variant.
    pub fn for_product(product: &Product, variant: Option<&ProductVariant>) -> Self {
        let selection = match variant {
            Some(variant) => LineSelection::Variant(variant.id.clone()),
            None => LineSelection::Single,
        };

        Self::new(product.id.clone(), selection)
    }

    /// Product the line belongs to
    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    /// Selection within the product
    pub fn selection(&self) -> &LineSelection {
        &self.selection
    }

    /// Re-apply attribute canonicalisation to a key that did not come from
    /// [`LineSelection::attributes`], such as one read back from storage.
    pub(crate) fn normalized(self) -> Self {
        let selection = match self.selection {
            LineSelection::Attributes(attributes) => LineSelection::attributes(
                attributes
                    .into_iter()
                    .map(|attribute| (attribute.name, attribute.value)),
            ),
            other => other,
        };

        Self::new(self.product_id, selection)
    }
}

impl fmt::Display for LineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.product_id)?;

        match &self.selection {
            LineSelection::Single => Ok(()),
            LineSelection::Variant(id) => write!(f, "-{id}"),
            LineSelection::Attributes(attributes) => attributes
                .iter()
                .try_for_each(|attribute| write!(f, "-{}={}", attribute.name, attribute.value)),
        }
    }
}

/// One row in the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    key: LineKey,
    snapshot: ProductSnapshot,
    quantity: NonZeroU32,
}

impl CartLine {
    /// Create a new cart line.
    pub fn new(key: LineKey, snapshot: ProductSnapshot, quantity: NonZeroU32) -> Self {
        Self {
            key,
            snapshot,
            quantity,
        }
    }

    /// Line identity
    pub fn key(&self) -> &LineKey {
        &self.key
    }

    /// Catalog data captured when the line was created
    pub fn snapshot(&self) -> &ProductSnapshot {
        &self.snapshot
    }

    /// Number of units on this line; never zero.
    pub fn quantity(&self) -> NonZeroU32 {
        self.quantity
    }

    /// Price of a single unit
    pub fn unit_price(&self) -> Money<'static, Currency> {
        self.snapshot.unit_price()
    }

    /// Unit price multiplied by quantity.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the total does not fit in minor units.
    pub fn line_total(&self) -> Result<Money<'static, Currency>, PricingError> {
        line_total(&self.unit_price(), self.quantity)
    }

    pub(crate) fn set_quantity(&mut self, quantity: NonZeroU32) {
        self.quantity = quantity;
    }

    pub(crate) fn increment(&mut self, by: NonZeroU32) -> Result<(), CartError> {
        self.quantity = self
            .quantity
            .checked_add(by.get())
            .ok_or(CartError::QuantityOverflow)?;

        Ok(())
    }
}
