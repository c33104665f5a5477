//! Domain error model.

use thiserror::Error;

/// Result type used across the money and line-item crates.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant describes bad caller input. None of them is recovered from
/// inside the library: they surface to the editing surface as values, and an
/// operation that fails leaves its input collection untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input could not be parsed as a finite decimal (or arithmetic overflowed).
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// An operation referenced a line item absent from the collection.
    #[error("line item not found: {0}")]
    ItemNotFound(String),

    /// A reorder referenced a position outside the collection bounds.
    #[error("index {index} out of range for {len} line items")]
    IndexOutOfRange { index: usize, len: usize },

    /// A value failed validation (e.g. negative tax rate).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn invalid_amount(msg: impl Into<String>) -> Self {
        Self::InvalidAmount(msg.into())
    }

    pub fn item_not_found(id: impl core::fmt::Display) -> Self {
        Self::ItemNotFound(id.to_string())
    }

    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
