//! Upload policy values consumed by the acceptor and the transcoder.
//!
//! A policy is plain data: the allow-list and size cap the acceptor enforces,
//! plus the ordered list of renditions the transcoder produces. Entity types
//! differ only in which policy value they pass in, never in code path.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_MAX_UPLOAD_BYTES;

/// Fixed decrement applied by the byte-budget quality search.
pub const QUALITY_STEP: u8 = 5;

/// Output container for transcoded variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantFormat {
    #[default]
    Jpeg,
    WebP,
}

impl VariantFormat {
    pub fn extension(self) -> &'static str {
        match self {
            VariantFormat::Jpeg => "jpg",
            VariantFormat::WebP => "webp",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            VariantFormat::Jpeg => "image/jpeg",
            VariantFormat::WebP => "image/webp",
        }
    }
}

/// One output rendition: target dimensions, the starting quality, and the
/// byte budget the quality search works against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantSpec {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub quality: u8,
    pub max_bytes: usize,
    pub min_quality: u8,
}

impl VariantSpec {
    /// Build a spec with qualities clamped to 1-100 and
    /// `min_quality <= quality`.
    pub fn new(
        name: impl Into<String>,
        width: u32,
        height: u32,
        quality: u8,
        max_bytes: usize,
        min_quality: u8,
    ) -> Self {
        let quality = quality.clamp(1, 100);
        let min_quality = min_quality.clamp(1, quality);
        Self {
            name: name.into(),
            width,
            height,
            quality,
            max_bytes,
            min_quality,
        }
    }
}

/// Declarative upload policy: what the acceptor admits and what the
/// transcoder produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadPolicy {
    pub allowed_content_types: Vec<String>,
    pub max_upload_bytes: usize,
    #[serde(default)]
    pub output_format: VariantFormat,
    pub variants: Vec<VariantSpec>,
}

impl UploadPolicy {
    /// Three-rendition policy used by gallery-style entities
    /// (staff profiles, product galleries).
    pub fn gallery() -> Self {
        Self::with_variants(vec![
            VariantSpec::new("large", 1200, 900, 80, 81920, 20),
            VariantSpec::new("medium", 600, 450, 78, 40960, 20),
            VariantSpec::new("thumb", 300, 225, 75, 16384, 20),
        ])
    }

    /// Single-rendition policy used by services, portfolio works and flat
    /// product cards.
    pub fn single() -> Self {
        Self::with_variants(vec![VariantSpec::new("default", 1200, 900, 80, 81920, 20)])
    }

    fn with_variants(variants: Vec<VariantSpec>) -> Self {
        Self {
            allowed_content_types: default_allowed_content_types(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            output_format: VariantFormat::Jpeg,
            variants,
        }
    }
}

/// The image container formats admitted by the reference policies.
pub fn default_allowed_content_types() -> Vec<String> {
    [
        "image/jpeg",
        "image/png",
        "image/webp",
        "image/avif",
        "image/heic",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
