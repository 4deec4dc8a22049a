//! Storage writer: collision-resistant naming plus all-or-nothing
//! persistence of one upload's variants.

use std::sync::Arc;

use uuid::Uuid;
use vitrine_core::{MediaError, VariantFormat};
use vitrine_storage::MediaStore;

use crate::types::{EncodedVariant, StoredVariant};

pub struct VariantWriter {
    store: Arc<dyn MediaStore>,
}

impl VariantWriter {
    pub fn new(store: Arc<dyn MediaStore>) -> Self {
        Self { store }
    }

    /// Persist every variant, or none.
    ///
    /// One random 128-bit token is drawn per upload; when the policy has
    /// multiple variants the target width is embedded in the filename so the
    /// sizes stay distinguishable on disk. On a failed write, variants
    /// already written for this call are deleted before the error is
    /// returned, so a `StoredVariant` set always refers to files that all
    /// exist.
    pub async fn store(
        &self,
        namespace: &str,
        format: VariantFormat,
        variants: Vec<EncodedVariant>,
    ) -> Result<Vec<StoredVariant>, MediaError> {
        let token = Uuid::new_v4().simple();
        let multi = variants.len() > 1;
        let mut written = Vec::with_capacity(variants.len());

        for variant in variants {
            let filename = if multi {
                format!("{}-{}.{}", token, variant.width, format.extension())
            } else {
                format!("{}.{}", token, format.extension())
            };

            match self
                .store
                .put(namespace, &filename, variant.bytes.to_vec())
                .await
            {
                Ok(path) => {
                    tracing::info!(
                        namespace,
                        variant = %variant.name,
                        path = %path,
                        quality = variant.quality,
                        "Stored upload variant"
                    );
                    written.push(StoredVariant {
                        name: variant.name,
                        path,
                    });
                }
                Err(e) => {
                    self.rollback(&written).await;
                    return Err(MediaError::WriteFailed(e.to_string()));
                }
            }
        }

        Ok(written)
    }

    async fn rollback(&self, written: &[StoredVariant]) {
        for variant in written {
            if let Err(e) = self.store.remove(&variant.path).await {
                tracing::warn!(
                    path = %variant.path,
                    error = %e,
                    "Failed to roll back partially written variant"
                );
            }
        }
    }
}
