//! Upload pipeline: validate → transcode → store.
//!
//! The canonical call chain for one upload. The caller blocks until every
//! rendition is transcoded and durably written; on any error nothing from
//! this upload remains on disk and no paths are returned, so the caller can
//! never persist a reference to a half-written upload.

use std::sync::Arc;

use vitrine_core::{MediaError, UploadPolicy};
use vitrine_storage::MediaStore;

use crate::transcoder::VariantTranscoder;
use crate::types::{StoredVariant, UploadCandidate};
use crate::validator::UploadValidator;
use crate::writer::VariantWriter;

/// Run one upload through the full pipeline.
pub async fn process_upload(
    candidate: UploadCandidate,
    policy: &UploadPolicy,
    store: Arc<dyn MediaStore>,
    namespace: &str,
) -> Result<Vec<StoredVariant>, MediaError> {
    let validator = UploadValidator::new(policy);
    validator.validate(&candidate)?;

    // Decode/resize/encode is CPU-bound; run off the async pool so
    // concurrent requests are not starved.
    let policy_for_transcode = policy.clone();
    let variants = tokio::task::spawn_blocking(move || {
        VariantTranscoder::transcode(&candidate.bytes, &policy_for_transcode)
    })
    .await
    .map_err(|e| MediaError::ProcessingFailed(e.to_string()))??;

    let writer = VariantWriter::new(store);
    writer.store(namespace, policy.output_format, variants).await
}
