//! `tally-core` — building blocks shared by the money and line-item crates.
//!
//! This crate contains **pure domain** primitives (no IO, no UI concerns).

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::{CatalogItemId, LineItemId};
