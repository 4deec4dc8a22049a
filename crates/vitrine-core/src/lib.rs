//! Vitrine Core Library
//!
//! This crate provides the configuration, upload policy values, and error
//! types shared by the media pipeline crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod policy;

// Re-export commonly used types
pub use config::MediaConfig;
pub use error::{ErrorMetadata, LogLevel, MediaError};
pub use policy::{UploadPolicy, VariantFormat, VariantSpec, QUALITY_STEP};
