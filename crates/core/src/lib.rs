//! Trolley
//!
//! Trolley is a client-local shopping cart engine: it keeps the selected product lines of a
//! single browsing profile, derives monetary totals under a fixed pricing policy, and persists
//! the selection across sessions.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod discounts;
pub mod fixtures;
pub mod persistence;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod store;
pub mod summary;
