//! Configuration module
//!
//! Environment-driven configuration for the media pipeline. Every knob has a
//! code default, so an empty environment yields a working local setup.

use std::env;
use std::path::PathBuf;

use crate::constants::DEFAULT_MAX_UPLOAD_BYTES;
use crate::policy::{default_allowed_content_types, UploadPolicy};

const DEFAULT_STORAGE_ROOT: &str = "./uploads-data";
const DEFAULT_PUBLIC_PREFIX: &str = "/uploads";

/// Media pipeline configuration
#[derive(Clone, Debug)]
pub struct MediaConfig {
    /// Root directory variant files are written under.
    pub storage_root: PathBuf,
    /// Prefix of the relative paths handed back to callers.
    pub public_prefix: String,
    pub max_upload_bytes: usize,
    pub allowed_content_types: Vec<String>,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            storage_root: PathBuf::from(DEFAULT_STORAGE_ROOT),
            public_prefix: DEFAULT_PUBLIC_PREFIX.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            allowed_content_types: default_allowed_content_types(),
        }
    }
}

impl MediaConfig {
    /// Load configuration from the environment, falling back to defaults.
    /// Reads a `.env` file when present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let storage_root = env::var("VITRINE_STORAGE_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_STORAGE_ROOT));

        let public_prefix = env::var("VITRINE_PUBLIC_PREFIX")
            .unwrap_or_else(|_| DEFAULT_PUBLIC_PREFIX.to_string());

        let max_upload_bytes = env::var("VITRINE_MAX_UPLOAD_BYTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);

        let allowed_content_types = env::var("VITRINE_ALLOWED_CONTENT_TYPES")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_lowercase())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_else(|_| default_allowed_content_types());

        Self {
            storage_root,
            public_prefix,
            max_upload_bytes,
            allowed_content_types,
        }
    }

    /// Optional upload-policy override supplied as JSON in
    /// `VITRINE_UPLOAD_POLICY`. Invalid JSON is ignored with a warning.
    pub fn policy_from_env() -> Option<UploadPolicy> {
        let raw = env::var("VITRINE_UPLOAD_POLICY").ok()?;
        match serde_json::from_str(&raw) {
            Ok(policy) => Some(policy),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring invalid VITRINE_UPLOAD_POLICY");
                None
            }
        }
    }
}
