//! # Admin Error Types
//!
//! Two shapes of failure leave this crate:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Shelf Admin                            │
//! │                                                                         │
//! │  ClientError ──┬──► Notice { code, message }  ──► shown in the form     │
//! │                │    (one generic message per operation, cause logged)   │
//! │                │                                                        │
//! │  CoreError  ───┼──► AdminError ──► CLI prints it, exits with 1          │
//! │  io / json  ───┘                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Notices never carry transport details; the operator only learns which
//! operation failed.

use serde::Serialize;
use shelf_client::ClientError;
use shelf_core::CoreError;
use thiserror::Error;

// =============================================================================
// Notices
// =============================================================================

/// A message for the operator, rendered above the form.
///
/// ## Serialization
/// ```json
/// {
///   "code": "DROPDOWN_LOAD_FAILED",
///   "message": "Failed to load dropdown options."
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub code: NoticeCode,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NoticeCode {
    /// Categories or manufacturers could not be fetched.
    DropdownLoadFailed,

    /// The selected image file could not be uploaded.
    UploadFailed,

    /// The draft itself could not be prepared (e.g. a stored size list
    /// that does not serialize).
    Internal,
}

impl Notice {
    pub fn new(code: NoticeCode, message: impl Into<String>) -> Self {
        Notice {
            code,
            message: message.into(),
        }
    }

    /// Notice for a failed category/manufacturer load.
    pub fn dropdown_load_failed(err: &ClientError) -> Self {
        tracing::error!(error = %err, "Failed to load categories or manufacturers");
        Notice::new(
            NoticeCode::DropdownLoadFailed,
            "Failed to load dropdown options.",
        )
    }

    /// Notice for a failed image upload.
    pub fn upload_failed(err: &ClientError) -> Self {
        tracing::error!(error = %err, "Failed to upload image");
        Notice::new(
            NoticeCode::UploadFailed,
            "Image upload failed. Select the file again or enter image URLs.",
        )
    }

    pub fn internal(err: &CoreError) -> Self {
        tracing::error!(error = %err, "Failed to prepare product form");
        Notice::new(NoticeCode::Internal, "The product could not be loaded.")
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

// =============================================================================
// Command Errors
// =============================================================================

/// Result type alias for admin commands.
pub type AdminResult<T> = Result<T, AdminError>;

#[derive(Debug, Error)]
pub enum AdminError {
    /// Wrong command line; the message is the usage text.
    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Failed to read {path}: {source}")]
    ReadInput {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON input: {0}")]
    Json(#[from] serde_json::Error),
}
