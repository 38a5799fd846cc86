//! Reagent-processing errors.

use rf_core::RfError;
use thiserror::Error;

/// Result type for reagent operations.
pub type ReagentResult<T> = Result<T, ReagentError>;

/// Errors that abort processing of one ingredient.
///
/// These are deterministic functions of the input, never transient: a
/// failed ingredient fails the same way on every attempt, so there is no
/// retry path. Non-fatal data-quality observations go through
/// [`crate::events::EventSink`] instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReagentError {
    /// Malformed or misaligned chemical-slot fields, or an identifier
    /// missing from the inventory. A concentration computed from a
    /// misaligned table would be silently wrong, so no partial result is
    /// ever produced.
    #[error("validation failed for ingredient '{ingredient}': {reason}")]
    Validation { ingredient: String, reason: String },

    /// Degenerate numeric state reaching the concentration step
    /// (a non-positive total volume leaves concentration undefined).
    #[error("concentration undefined for model '{model}': {reason}")]
    Computation { model: String, reason: String },

    /// Numeric-foundation failure (non-finite intermediate value).
    #[error(transparent)]
    Core(#[from] RfError),
}
