//! Persistence
//!
//! Carts are persisted as a versioned JSON envelope in a key-value byte store. Only the lines and
//! the discount are written; totals are always derived again when a cart is read back.

use thiserror::Error;

use crate::{
    cart::{Cart, CartError},
    persistence::records::{CURRENT_VERSION, CartEnvelope},
    pricing::PricingPolicy,
};

pub mod file;
pub mod memory;
pub mod records;

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "trolley-cart";

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying IO failure
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Key cannot be used by this backend.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// Errors raised while encoding or decoding a persisted cart.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Malformed JSON, or JSON with the wrong shape
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Envelope written by an incompatible version
    #[error("unsupported cart version {0}")]
    UnsupportedVersion(u32),

    /// Currency code not known to `rusty_money`
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Lines that do not form a valid cart under the current policy
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Key-value byte store holding persisted carts.
pub trait CartStorage {
    /// Read the bytes stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read.
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Replace the bytes stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn save(&mut self, key: &str, bytes: &[u8]) -> Result<(), StorageError>;

    /// Delete whatever is stored under `key`. Missing keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: CartStorage + ?Sized> CartStorage for &mut S {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        (**self).save(key, bytes)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Serialize the persistent part of a cart.
///
/// # Errors
///
/// Returns [`CodecError::Json`] if serialization fails.
pub fn encode(cart: &Cart) -> Result<Vec<u8>, CodecError> {
    Ok(serde_json::to_vec(&CartEnvelope::from(cart))?)
}

/// Rebuild a cart from persisted bytes, deriving totals under `policy`.
///
/// # Errors
///
/// Returns a [`CodecError`] if the bytes are not a cart this version understands, or if the
/// stored lines are not valid under `policy`.
pub fn decode(bytes: &[u8], policy: PricingPolicy) -> Result<Cart, CodecError> {
    let envelope: CartEnvelope = serde_json::from_slice(bytes)?;

    if envelope.version != CURRENT_VERSION {
        return Err(CodecError::UnsupportedVersion(envelope.version));
    }

    envelope.state.into_cart(policy)
}
