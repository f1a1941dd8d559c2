//! Error types for selection and catalogue lookups

use thiserror::Error;

/// Failure to resolve a model or tint against the catalogue.
///
/// The current selection is never modified when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Unknown model: {0}")]
    UnknownModel(String),

    #[error("Invalid tint: {0} (expected a palette name or #RRGGBB / #RRGGBBAA)")]
    InvalidTint(String),

    #[error("Catalogue has no {0}")]
    EmptyCatalogue(&'static str),
}

/// Result type alias for selection operations
pub type SelectionResult<T> = std::result::Result<T, SelectionError>;
