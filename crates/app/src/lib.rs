//! Trolley command-line application: configuration, logging and the cart context shared by the
//! `trolley` binary.

pub mod checkout;
pub mod config;
pub mod context;
pub mod errors;
pub mod observability;
