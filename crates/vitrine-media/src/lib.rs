//! Vitrine Media Library
//!
//! The media ingestion pipeline: accept an uploaded image, transcode it to
//! the policy's renditions under their byte budgets, and persist the result
//! through the storage seam. Callers keep only the returned relative paths,
//! persist them with their own record, and hand them back to
//! `vitrine_storage::reclaim` when the owning record is updated or deleted.

pub mod encode;
pub mod pipeline;
pub mod transcoder;
pub mod types;
pub mod validator;
pub mod writer;

// Re-export commonly used types
pub use pipeline::process_upload;
pub use transcoder::VariantTranscoder;
pub use types::{EncodedVariant, StoredVariant, UploadCandidate};
pub use validator::UploadValidator;
pub use writer::VariantWriter;
