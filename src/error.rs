//! # Error Types
//!
//! One error enum per pipeline stage, plus [`QrStampError`] which wraps them
//! for callers that drive the whole pipeline.

use thiserror::Error;

/// Content failed validation before any encoding was attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was empty after trimming whitespace.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

/// The payload could not be turned into a QR symbol.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// The payload exceeds the capacity of the largest QR version at the
    /// requested error-correction level.
    #[error("Payload too large for a QR code")]
    PayloadTooLarge,

    /// The encoder refused the payload for another reason.
    #[error("Unsupported content: {0}")]
    UnsupportedContent(String),
}

/// Writing the image out failed.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// I/O or PNG encoder failure.
    #[error("Failed to write image: {0}")]
    WriteFailed(String),

    /// The destination asks for a format other than lossless PNG.
    #[error("Unsupported image format '{0}' (only PNG is written)")]
    UnsupportedFormat(String),
}

/// Main error type for qrstamp operations
#[derive(Debug, Error)]
pub enum QrStampError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// HTTP server setup or runtime failure
    #[error("Server error: {0}")]
    Server(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
