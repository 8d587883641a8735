//! SQLite backend for the Dossier registry.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime.

mod encode;
mod schema;
mod store;

pub mod config;
pub mod error;

pub use crate::config::{Seed, StoreConfig};
pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
