//! Cart Store
//!
//! Owns one cart, the storage it is persisted to, and the UI-only open flag. Every mutation runs
//! mutate, recompute, persist before returning.

use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::{
    cart::{
        Cart, CartError,
        line::{LineKey, LineSelection},
        totals::CartTotals,
    },
    checkout::{CheckoutCollaborator, CheckoutError, CheckoutSnapshot},
    persistence::{self, CartStorage, CodecError, StorageError},
    pricing::PricingPolicy,
    products::{Product, ProductVariant},
};

/// Errors raised by store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The cart rejected the operation; nothing changed.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// The cart changed in memory but could not be written.
    #[error("failed to persist cart: {0}")]
    Storage(#[from] StorageError),

    /// The cart could not be serialized.
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// How the store came by its cart when it was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Restored {
    /// Nothing was stored under the key.
    Empty,

    /// The stored cart was read back.
    Persisted,

    /// Stored data could not be used, so the store started empty.
    Discarded,
}

/// Cart Store
#[derive(Debug)]
pub struct CartStore<S> {
    storage: S,
    key: String,
    cart: Cart,
    is_open: bool,
    restored: Restored,
}

impl<S: CartStorage> CartStore<S> {
    /// Open the cart stored under `key`, deriving totals under `policy`.
    ///
    /// Never fails: unreadable or invalid data is logged and the store starts with an empty cart.
    pub fn open(storage: S, key: impl Into<String>, policy: PricingPolicy) -> Self {
        let key = key.into();

        let (cart, restored) = match storage.load(&key) {
            Ok(None) => (Cart::new(policy), Restored::Empty),
            Ok(Some(bytes)) => match persistence::decode(&bytes, policy) {
                Ok(cart) => {
                    debug!(%key, lines = cart.len(), "restored cart");

                    (cart, Restored::Persisted)
                }
                Err(err) => {
                    warn!(%key, error = %err, "discarding unreadable cart");

                    (Cart::new(policy), Restored::Discarded)
                }
            },
            Err(err) => {
                warn!(%key, error = %err, "failed to load cart, starting empty");

                (Cart::new(policy), Restored::Discarded)
            }
        };

        Self {
            storage,
            key,
            cart,
            is_open: false,
            restored,
        }
    }

    /// Current cart
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Derived totals of the current cart
    pub fn totals(&self) -> &CartTotals {
        self.cart.totals()
    }

    /// Storage key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Where the cart came from when the store was opened
    pub fn restored(&self) -> Restored {
        self.restored
    }

    /// Underlying storage
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Consume the store, returning its storage.
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Whether the cart panel is shown. Never persisted.
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Show the cart panel.
    pub fn open_cart(&mut self) {
        self.is_open = true;
    }

    /// Hide the cart panel.
    pub fn close_cart(&mut self) {
        self.is_open = false;
    }

    /// Flip the cart panel.
    pub fn toggle_cart(&mut self) {
        self.is_open = !self.is_open;
    }

    /// Add items and open the cart panel. See [`Cart::add_item`].
    ///
    /// # Errors
    ///
    /// - [`StoreError::Cart`]: the cart rejected the item and is unchanged.
    /// - [`StoreError::Storage`]: the item was added but could not be persisted.
    pub fn add_item(
        &mut self,
        product: &Product,
        variant: Option<&ProductVariant>,
        quantity: u32,
    ) -> Result<LineKey, StoreError> {
        let key = self.cart.add_item(product, variant, quantity)?;

        self.is_open = true;
        self.persist()?;

        Ok(key)
    }

    /// Add items picked by attributes and open the cart panel. See [`Cart::add_selection`].
    ///
    /// # Errors
    ///
    /// See [`CartStore::add_item`].
    pub fn add_selection(
        &mut self,
        product: &Product,
        selection: LineSelection,
        quantity: u32,
    ) -> Result<LineKey, StoreError> {
        let key = self.cart.add_selection(product, selection, quantity)?;

        self.is_open = true;
        self.persist()?;

        Ok(key)
    }

    /// Remove a line. Unknown keys are a no-op and nothing is written.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Cart`]: totals could not be derived and the cart is unchanged.
    /// - [`StoreError::Storage`]: the line was removed but could not be persisted.
    pub fn remove_item(&mut self, key: &LineKey) -> Result<bool, StoreError> {
        let removed = self.cart.remove_item(key)?;

        if removed {
            self.persist()?;
        }

        Ok(removed)
    }

    /// Set a line quantity exactly; zero or less removes the line.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Cart`]: the quantity was rejected and the cart is unchanged.
    /// - [`StoreError::Storage`]: the line changed but could not be persisted.
    pub fn update_quantity(&mut self, key: &LineKey, quantity: i64) -> Result<bool, StoreError> {
        let changed = self.cart.update_quantity(key, quantity)?;

        if changed {
            self.persist()?;
        }

        Ok(changed)
    }

    /// Empty the cart and delete whatever is stored under the key.
    ///
    /// An empty cart and a missing entry restore the same way, so nothing is written in its place.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the stored cart could not be deleted.
    pub fn clear_cart(&mut self) -> Result<(), StoreError> {
        self.cart.clear()?;

        self.storage.remove(&self.key).map_err(|err| {
            error!(key = %self.key, error = %err, "failed to delete stored cart");

            StoreError::from(err)
        })
    }

    /// Set the promotion discount.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Cart`]: the discount was rejected and the cart is unchanged.
    /// - [`StoreError::Storage`]: the discount was applied but could not be persisted.
    pub fn apply_discount(&mut self, discount: Money<'static, Currency>) -> Result<(), StoreError> {
        self.cart.apply_discount(discount)?;
        self.persist()
    }

    /// Hand the cart to a checkout collaborator and empty it once a session exists.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::EmptyCart`]: there is nothing to check out.
    /// - [`CheckoutError::Collaborator`]: no session was created; the cart is unchanged.
    /// - [`CheckoutError::Store`]: the cart was emptied but could not be persisted.
    pub fn checkout<C: CheckoutCollaborator>(
        &mut self,
        collaborator: &mut C,
    ) -> Result<C::Session, CheckoutError<C::Error>> {
        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let snapshot = CheckoutSnapshot::from(&self.cart);

        let session = collaborator
            .begin_checkout(&snapshot)
            .map_err(CheckoutError::Collaborator)?;

        debug!(key = %self.key, total = snapshot.total(), "checkout started");

        self.clear_cart()?;

        Ok(session)
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let bytes = persistence::encode(&self.cart)?;

        self.storage.save(&self.key, &bytes).map_err(|err| {
            error!(key = %self.key, error = %err, "failed to persist cart");

            StoreError::from(err)
        })
    }
}
