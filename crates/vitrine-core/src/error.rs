//! Error types module
//!
//! The upload pipeline's error taxonomy. Every failed upload surfaces as one
//! `MediaError`; reclaim never produces one (per-path delete failures are
//! carried in the reclaim report instead, so cleanup problems cannot block a
//! business update).

use thiserror::Error;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation rejections
    Debug,
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented.
/// This trait lets the HTTP layer shape responses without matching on
/// variants.
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "UNSUPPORTED_MEDIA_TYPE")
    fn error_code(&self) -> &'static str;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Unsupported media type: {content_type} (allowed: {allowed:?})")]
    UnsupportedMediaType {
        content_type: String,
        allowed: Vec<String>,
    },

    #[error("File too large: {size} bytes (max: {max} bytes)")]
    PayloadTooLarge { size: usize, max: usize },

    #[error("Expected exactly one file, got {count}")]
    TooManyFiles { count: usize },

    #[error("Empty file")]
    EmptyFile,

    #[error("Image processing failed: {0}")]
    ProcessingFailed(String),

    #[error("Storage write failed: {0}")]
    WriteFailed(String),
}

impl ErrorMetadata for MediaError {
    fn http_status_code(&self) -> u16 {
        match self {
            MediaError::UnsupportedMediaType { .. } => 415,
            MediaError::PayloadTooLarge { .. } => 413,
            MediaError::TooManyFiles { .. } => 400,
            MediaError::EmptyFile => 400,
            MediaError::ProcessingFailed(_) => 422,
            MediaError::WriteFailed(_) => 500,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            MediaError::UnsupportedMediaType { .. } => "UNSUPPORTED_MEDIA_TYPE",
            MediaError::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
            MediaError::TooManyFiles { .. } => "TOO_MANY_FILES",
            MediaError::EmptyFile => "EMPTY_FILE",
            MediaError::ProcessingFailed(_) => "PROCESSING_FAILED",
            MediaError::WriteFailed(_) => "WRITE_FAILED",
        }
    }

    fn client_message(&self) -> String {
        match self {
            MediaError::WriteFailed(_) => "Failed to store uploaded image".to_string(),
            other => other.to_string(),
        }
    }

    fn log_level(&self) -> LogLevel {
        match self {
            MediaError::UnsupportedMediaType { .. }
            | MediaError::PayloadTooLarge { .. }
            | MediaError::TooManyFiles { .. }
            | MediaError::EmptyFile => LogLevel::Debug,
            MediaError::ProcessingFailed(_) => LogLevel::Warn,
            MediaError::WriteFailed(_) => LogLevel::Error,
        }
    }
}
