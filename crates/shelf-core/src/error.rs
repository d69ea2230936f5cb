//! # Error Types
//!
//! Domain-specific error types for shelf-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shelf-core errors (this file)                                          │
//! │  ├── ValidationError  - One user-correctable problem with one field     │
//! │  └── CoreError        - Misuse of a draft, or a form that failed        │
//! │                                                                         │
//! │  shelf-client errors (separate crate)                                   │
//! │  └── ClientError      - Backend / configuration failures                │
//! │                                                                         │
//! │  admin app                                                              │
//! │  └── Notice           - What the operator sees (one generic line)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation errors are never raised one at a time during a submit: the
//! validator collects them into a [`FormErrors`] map keyed by field, and the
//! UI renders each message next to its input.

use thiserror::Error;

use crate::validation::{FormErrors, FormField};

// =============================================================================
// Validation Error
// =============================================================================

/// A single field-level validation failure.
///
/// All variants are recoverable; the operator fixes the input and submits
/// again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is blank or whitespace-only.
    #[error("{field} is required")]
    MissingField { field: FormField },

    /// The field does not parse as a number greater than zero.
    #[error("{field} must be a number greater than 0")]
    InvalidNumber { field: FormField },

    /// Neither an image URL nor an uploaded file was provided.
    #[error("Image URL is required, or an image file must be uploaded")]
    MissingImageSource,

    /// Both an image URL and an uploaded file were provided.
    #[error("Provide either an image URL or an image file, not both")]
    ConflictingImageSource,

    /// The field does not parse as an absolute URL.
    #[error("{field} is invalid")]
    InvalidUrl { field: FormField },

    /// A size row has a blank name or a negative stock.
    #[error("Each size must have a name and a non-negative stock")]
    InvalidSizeEntry,

    /// Two size rows share a name (ignoring case and surrounding spaces).
    #[error("Size names must be unique")]
    DuplicateSizeName,
}

impl ValidationError {
    /// Machine-readable code for the UI.
    pub const fn code(&self) -> &'static str {
        match self {
            ValidationError::MissingField { .. } => "MISSING_FIELD",
            ValidationError::InvalidNumber { .. } => "INVALID_NUMBER",
            ValidationError::MissingImageSource => "MISSING_IMAGE_SOURCE",
            ValidationError::ConflictingImageSource => "CONFLICTING_IMAGE_SOURCE",
            ValidationError::InvalidUrl { .. } => "INVALID_URL",
            ValidationError::InvalidSizeEntry => "INVALID_SIZE_ENTRY",
            ValidationError::DuplicateSizeName => "DUPLICATE_SIZE_NAME",
        }
    }
}

// =============================================================================
// Core Error
// =============================================================================

/// Errors from operating on drafts.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An edit addressed a row that does not exist.
    ///
    /// ## When This Occurs
    /// - The UI sent an update for a line that was removed meanwhile
    /// - A size row index is stale after `remove`
    #[error("{collection} index {index} out of range (length {len})")]
    IndexOutOfRange {
        collection: &'static str,
        index: usize,
        len: usize,
    },

    /// The product form did not validate; the map says why.
    #[error("form has {} invalid field(s)", .0.len())]
    InvalidForm(FormErrors),

    /// The size list could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
