//! Upload acceptor: the policy gate run before any transcoding work.

use vitrine_core::{MediaError, UploadPolicy};

use crate::types::UploadCandidate;

/// Upload validator
///
/// Purely a gate: no side effects, and it runs before any decode work so
/// oversized or mistyped input costs no CPU.
pub struct UploadValidator {
    allowed_content_types: Vec<String>,
    max_upload_bytes: usize,
}

impl UploadValidator {
    pub fn new(policy: &UploadPolicy) -> Self {
        Self {
            allowed_content_types: policy.allowed_content_types.clone(),
            max_upload_bytes: policy.max_upload_bytes,
        }
    }

    /// Validate the declared content type against the allow-list.
    pub fn validate_content_type(&self, content_type: &str) -> Result<(), MediaError> {
        if !self
            .allowed_content_types
            .iter()
            .any(|ct| ct.eq_ignore_ascii_case(content_type))
        {
            return Err(MediaError::UnsupportedMediaType {
                content_type: content_type.to_string(),
                allowed: self.allowed_content_types.clone(),
            });
        }

        Ok(())
    }

    /// Validate the measured byte length.
    pub fn validate_size(&self, size: usize) -> Result<(), MediaError> {
        if size == 0 {
            return Err(MediaError::EmptyFile);
        }

        if size > self.max_upload_bytes {
            return Err(MediaError::PayloadTooLarge {
                size,
                max: self.max_upload_bytes,
            });
        }

        Ok(())
    }

    /// Reject multipart requests that delivered more than one file where
    /// exactly one is expected.
    pub fn ensure_single_file(&self, count: usize) -> Result<(), MediaError> {
        if count != 1 {
            return Err(MediaError::TooManyFiles { count });
        }

        Ok(())
    }

    /// Full gate. The content-type check runs first: an upload that is both
    /// unsupported and oversized reports the unsupported type.
    pub fn validate(&self, candidate: &UploadCandidate) -> Result<(), MediaError> {
        self.validate_content_type(&candidate.content_type)?;
        self.validate_size(candidate.bytes.len())?;
        Ok(())
    }
}
