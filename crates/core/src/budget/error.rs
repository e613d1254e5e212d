//! Budget error types.

use thiserror::Error;

/// Budget domain errors.
///
/// Every validation variant carries the final user-facing message,
/// constructed at the point of detection; handlers forward the text
/// verbatim. `Store` wraps any persistence failure and is the only
/// variant that must not be shown to callers.
#[derive(Debug, Error)]
pub enum BudgetError {
    /// A required field was empty.
    #[error("{0}")]
    EmptyField(String),

    /// The owner already has a budget with that name.
    #[error("You already have a budget with that name.")]
    DuplicateName,

    /// A numeric field could not be parsed.
    #[error("{0}")]
    NotANumber(String),

    /// A field value is outside its allowed set.
    #[error("{0}")]
    InvalidValue(String),

    /// A monetary amount was negative.
    #[error("{0}")]
    NegativeValue(String),

    /// The entity does not exist or does not belong to the caller.
    #[error("{0}")]
    NotFound(String),

    /// Persistence collaborator failure.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

/// Opaque failure reported by a [`crate::budget::BudgetStore`]
/// implementation.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StoreError(String);

impl StoreError {
    /// Wraps any displayable error.
    #[must_use]
    pub fn new(source: impl std::fmt::Display) -> Self {
        Self(source.to_string())
    }
}
