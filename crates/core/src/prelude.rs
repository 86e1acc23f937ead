//! Trolley prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{
        Cart, CartError,
        line::{Attribute, CartLine, LineKey, LineSelection},
        totals::CartTotals,
    },
    catalog::{Catalog, CatalogError, InMemoryCatalog},
    checkout::{CheckoutCollaborator, CheckoutError, CheckoutLine, CheckoutSnapshot},
    discounts::{Discount, DiscountError},
    fixtures::{CatalogFixture, FixtureError},
    persistence::{
        CartStorage, CodecError, DEFAULT_STORAGE_KEY, StorageError, file::FileStorage,
        memory::MemoryStorage,
    },
    pricing::{PricingError, PricingPolicy},
    products::{Product, ProductId, ProductSnapshot, ProductVariant, VariantId},
    store::{CartStore, Restored, StoreError},
    summary::{CartSummary, SummaryError},
};
