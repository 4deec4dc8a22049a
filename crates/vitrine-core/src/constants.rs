//! Shared constants.

/// Default cap on a single uploaded file, measured on the raw bytes.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Storage namespace tags, one per entity type that owns images.
///
/// Namespaces are chosen by the caller, never derived from user input.
pub mod namespaces {
    pub const SERVICES: &str = "services";
    pub const PRODUCTS: &str = "products";
    pub const MASTERS: &str = "masters";
    pub const WORKS: &str = "works";
}
