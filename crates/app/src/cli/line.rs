use clap::Args;
use trolley::prelude::{LineKey, LineSelection, ProductId, VariantId};

/// Identifies a cart line from the command line.
#[derive(Debug, Args)]
pub(crate) struct LineArgs {
    /// Product identifier
    pub(crate) product: String,

    /// Catalog variant identifier
    #[arg(long, conflicts_with_all = ["size", "color"])]
    pub(crate) variant: Option<String>,

    /// Size attribute, for catalogs without variants
    #[arg(long)]
    pub(crate) size: Option<String>,

    /// Colour attribute, for catalogs without variants
    #[arg(long)]
    pub(crate) color: Option<String>,
}

impl LineArgs {
    pub(crate) fn product_id(&self) -> ProductId {
        ProductId::from(self.product.as_str())
    }

    pub(crate) fn selection(&self) -> LineSelection {
        if let Some(variant) = &self.variant {
            return LineSelection::Variant(VariantId::from(variant.as_str()));
        }

        let attributes = [("size", &self.size), ("color", &self.color)]
            .into_iter()
            .filter_map(|(name, value)| value.as_deref().map(|value| (name, value)));

        LineSelection::attributes(attributes)
    }

    pub(crate) fn key(&self) -> LineKey {
        LineKey::new(self.product_id(), self.selection())
    }
}
