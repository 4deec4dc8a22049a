//! Variant transcoder: decode once, then resize and encode each rendition
//! under its byte budget.

use std::io::Cursor;

use anyhow::Result;
use bytes::Bytes;
use image::imageops::FilterType;
use vitrine_core::policy::{UploadPolicy, VariantSpec, QUALITY_STEP};
use vitrine_core::MediaError;

use crate::encode::encode_variant;
use crate::types::EncodedVariant;

pub struct VariantTranscoder;

impl VariantTranscoder {
    /// Produce every rendition the policy asks for, or fail the upload as a
    /// whole.
    ///
    /// A buffer that cannot be decoded (corrupt data, or a container that
    /// passed the acceptor's MIME check but does not parse) fails with
    /// `ProcessingFailed`; no partial variant set is ever returned.
    pub fn transcode(
        data: &[u8],
        policy: &UploadPolicy,
    ) -> Result<Vec<EncodedVariant>, MediaError> {
        let cursor = Cursor::new(data);
        let img = image::ImageReader::new(cursor)
            .with_guessed_format()
            .map_err(|e| MediaError::ProcessingFailed(e.to_string()))?
            .decode()
            .map_err(|e| MediaError::ProcessingFailed(e.to_string()))?;

        let mut variants = Vec::with_capacity(policy.variants.len());
        for spec in &policy.variants {
            // Cover fit: crop to fill the exact target box, upscaling when
            // the source is smaller.
            let resized = img.resize_to_fill(spec.width, spec.height, FilterType::Lanczos3);

            let (quality, bytes) =
                encode_within_budget(spec, |q| encode_variant(&resized, policy.output_format, q))
                    .map_err(|e| MediaError::ProcessingFailed(e.to_string()))?;

            if bytes.len() > spec.max_bytes {
                tracing::debug!(
                    variant = %spec.name,
                    size_bytes = bytes.len(),
                    max_bytes = spec.max_bytes,
                    quality,
                    "Variant still over budget at the quality floor"
                );
            }

            variants.push(EncodedVariant {
                name: spec.name.clone(),
                width: spec.width,
                height: spec.height,
                quality,
                bytes,
            });
        }

        Ok(variants)
    }
}

/// Iterative quality-reduction search against `spec.max_bytes`.
///
/// Encodes at `spec.quality`, then steps down by `QUALITY_STEP` (clamped to
/// `spec.min_quality`) while the output is over budget. Flooring out returns
/// the over-budget buffer unchanged: the byte budget is a target, not a hard
/// contract. Bounded: at most
/// `ceil((quality - min_quality) / QUALITY_STEP) + 1` encode calls.
pub(crate) fn encode_within_budget<E>(spec: &VariantSpec, mut encode: E) -> Result<(u8, Bytes)>
where
    E: FnMut(u8) -> Result<Bytes>,
{
    let mut quality = spec.quality;
    let mut bytes = encode(quality)?;

    while bytes.len() > spec.max_bytes && quality > spec.min_quality {
        quality = quality.saturating_sub(QUALITY_STEP).max(spec.min_quality);
        bytes = encode(quality)?;
    }

    Ok((quality, bytes))
}
