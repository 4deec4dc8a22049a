//! Types for the upload pipeline.

use bytes::Bytes;

/// Raw upload as received from the transport layer.
///
/// The size the transport declared is never trusted; the acceptor measures
/// `bytes.len()` itself.
#[derive(Clone, Debug)]
pub struct UploadCandidate {
    pub bytes: Vec<u8>,
    pub content_type: String,
    /// Size the transport declared, kept for logging only.
    pub declared_byte_size: Option<usize>,
}

impl UploadCandidate {
    pub fn new(bytes: Vec<u8>, content_type: impl Into<String>) -> Self {
        Self {
            bytes,
            content_type: content_type.into(),
            declared_byte_size: None,
        }
    }

    pub fn with_declared_size(mut self, size: usize) -> Self {
        self.declared_byte_size = Some(size);
        self
    }
}

/// One transcoded rendition, not yet persisted.
#[derive(Clone, Debug)]
pub struct EncodedVariant {
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// Quality the byte-budget search settled on.
    pub quality: u8,
    pub bytes: Bytes,
}

/// A durably written rendition. `path` is the capability the caller persists
/// with its record and later passes to reclaim; it is never parsed for
/// business meaning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredVariant {
    pub name: String,
    pub path: String,
}
