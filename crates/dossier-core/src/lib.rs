//! Core types and trait definitions for the Dossier registry.
//!
//! This crate is deliberately free of database dependencies. Storage
//! backends implement [`store::RegistryStore`]; callers depend on the trait.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod connect;
pub mod dependent;
pub mod dossier;
pub mod error;
pub mod lookup;
pub mod person;
pub mod stamp;
pub mod store;

pub use error::{Error, Result};
