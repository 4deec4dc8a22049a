//! Vitrine Storage Library
//!
//! Storage seam for the media pipeline: the `MediaStore` trait, the local
//! filesystem backend, and batch reclaim of previously stored files.
//!
//! # Path format
//!
//! `put` returns `<public_prefix>/<namespace>/<filename>`; that string is the
//! only handle callers hold on a stored file. `remove` and `exists` accept
//! exactly that shape and reject anything else, so a stored path can never
//! resolve outside the storage root.

pub mod local;
pub mod reclaim;
pub mod traits;

// Re-export commonly used types
pub use local::LocalMediaStore;
pub use reclaim::{reclaim, ReclaimOutcome, ReclaimReport};
pub use traits::{MediaStore, StorageError, StorageResult};
