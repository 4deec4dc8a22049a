//! End-to-end tests for the upload pipeline against the local store.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use image::{DynamicImage, GenericImageView, ImageFormat, Rgb, RgbImage};
use tempfile::tempdir;
use vitrine_core::constants::namespaces;
use vitrine_core::{MediaConfig, MediaError, UploadPolicy, VariantSpec};
use vitrine_media::{process_upload, UploadCandidate, VariantTranscoder};
use vitrine_storage::{reclaim, LocalMediaStore, MediaStore, StorageError, StorageResult};

/// Synthetic photo-like source: smooth gradients, compresses well.
fn source_jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        let r = (x * 255 / width) as u8;
        let g = (y * 255 / height) as u8;
        let b = (((x + y) / 32) % 256) as u8;
        Rgb([r, g, b])
    });
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    DynamicImage::ImageRgb8(img)
        .write_to(&mut cursor, ImageFormat::Jpeg)
        .unwrap();
    buffer
}

/// High-frequency noise source, lossless-encoded so the noise survives.
/// Noise is the worst case for JPEG, which keeps first encodes over budget.
fn noise_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        let v = x
            .wrapping_mul(1_103_515_245)
            .wrapping_add(y.wrapping_mul(12_345));
        Rgb([(v >> 8) as u8, (v >> 16) as u8, (v >> 24) as u8])
    });
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    DynamicImage::ImageRgb8(img)
        .write_to(&mut cursor, ImageFormat::Png)
        .unwrap();
    buffer
}

/// Store wrapper that fails the n-th write, for rollback verification.
struct FlakyStore {
    inner: LocalMediaStore,
    puts: AtomicUsize,
    fail_on: usize,
}

#[async_trait]
impl MediaStore for FlakyStore {
    async fn put(&self, namespace: &str, filename: &str, data: Vec<u8>) -> StorageResult<String> {
        let n = self.puts.fetch_add(1, Ordering::SeqCst) + 1;
        if n == self.fail_on {
            return Err(StorageError::WriteFailed("injected disk failure".to_string()));
        }
        self.inner.put(namespace, filename, data).await
    }

    async fn remove(&self, relative_path: &str) -> StorageResult<bool> {
        self.inner.remove(relative_path).await
    }

    async fn exists(&self, relative_path: &str) -> StorageResult<bool> {
        self.inner.exists(relative_path).await
    }
}

#[tokio::test]
async fn test_end_to_end_single_variant_within_budget() {
    let dir = tempdir().unwrap();
    let config = MediaConfig {
        storage_root: dir.path().to_path_buf(),
        ..MediaConfig::default()
    };
    let store = Arc::new(
        LocalMediaStore::new(config.storage_root, config.public_prefix)
            .await
            .unwrap(),
    );

    let data = source_jpeg(6000, 4000);
    let candidate = UploadCandidate::new(data, "image/jpeg");
    let policy = UploadPolicy::single();

    let stored = process_upload(candidate, &policy, store.clone(), namespaces::SERVICES)
        .await
        .unwrap();

    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].name, "default");
    let path = &stored[0].path;
    assert!(path.starts_with("/uploads/services/"));
    assert!(store.exists(path).await.unwrap());

    let filename = path.rsplit('/').next().unwrap();
    let bytes = std::fs::read(dir.path().join("services").join(filename)).unwrap();
    assert!(
        bytes.len() <= 81920,
        "variant is {} bytes, over the 81920 budget",
        bytes.len()
    );

    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!(decoded.dimensions(), (1200, 900));
}

#[tokio::test]
async fn test_gallery_upload_writes_three_renditions() {
    let dir = tempdir().unwrap();
    let store = Arc::new(LocalMediaStore::new(dir.path(), "/uploads").await.unwrap());

    let data = source_jpeg(1600, 1200);
    let candidate = UploadCandidate::new(data, "image/jpeg");

    let stored = process_upload(candidate, &UploadPolicy::gallery(), store.clone(), namespaces::MASTERS)
        .await
        .unwrap();

    assert_eq!(stored.len(), 3);
    assert!(stored[0].path.contains("-1200.jpg"));
    assert!(stored[1].path.contains("-600.jpg"));
    assert!(stored[2].path.contains("-300.jpg"));

    for variant in &stored {
        assert!(store.exists(&variant.path).await.unwrap());
    }
}

#[tokio::test]
async fn test_failed_second_write_leaves_no_files() {
    let dir = tempdir().unwrap();
    let inner = LocalMediaStore::new(dir.path(), "/uploads").await.unwrap();
    let store = Arc::new(FlakyStore {
        inner,
        puts: AtomicUsize::new(0),
        fail_on: 2,
    });

    let data = source_jpeg(1600, 1200);
    let candidate = UploadCandidate::new(data, "image/jpeg");

    let result = process_upload(candidate, &UploadPolicy::gallery(), store, namespaces::MASTERS).await;
    assert!(matches!(result, Err(MediaError::WriteFailed(_))));

    // The first rendition was written before the injected failure; rollback
    // must have removed it.
    let remaining = std::fs::read_dir(dir.path().join("masters"))
        .map(|entries| entries.count())
        .unwrap_or(0);
    assert_eq!(remaining, 0);
}

#[tokio::test]
async fn test_update_lifecycle_reclaims_old_paths() {
    let dir = tempdir().unwrap();
    let store = Arc::new(LocalMediaStore::new(dir.path(), "/uploads").await.unwrap());

    let data = source_jpeg(1600, 1200);
    let candidate = UploadCandidate::new(data, "image/jpeg");
    let stored = process_upload(candidate, &UploadPolicy::gallery(), store.clone(), namespaces::WORKS)
        .await
        .unwrap();

    let old_paths: Vec<String> = stored.iter().map(|v| v.path.clone()).collect();

    let report = reclaim(store.as_ref(), &old_paths).await;
    assert_eq!(report.deleted(), 3);
    assert!(report.is_clean());
    for path in &old_paths {
        assert!(!store.exists(path).await.unwrap());
    }

    // A second reclaim of the same record's paths is a no-op.
    let report = reclaim(store.as_ref(), &old_paths).await;
    assert_eq!(report.already_absent(), 3);
    assert!(report.is_clean());
}

#[tokio::test]
async fn test_rejected_uploads_never_touch_storage() {
    let dir = tempdir().unwrap();
    let store = Arc::new(LocalMediaStore::new(dir.path(), "/uploads").await.unwrap());
    let policy = UploadPolicy::single();

    // Unsupported type wins over the size check.
    let candidate = UploadCandidate::new(vec![0u8; 6 * 1024 * 1024], "text/plain");
    let result = process_upload(candidate, &policy, store.clone(), namespaces::PRODUCTS).await;
    assert!(matches!(result, Err(MediaError::UnsupportedMediaType { .. })));

    // Oversized but allowed type.
    let candidate = UploadCandidate::new(vec![0u8; 6 * 1024 * 1024], "image/jpeg");
    let result = process_upload(candidate, &policy, store.clone(), namespaces::PRODUCTS).await;
    assert!(matches!(result, Err(MediaError::PayloadTooLarge { .. })));

    // Declared type passes the gate but the payload does not parse.
    let candidate = UploadCandidate::new(b"definitely not a jpeg".to_vec(), "image/jpeg");
    let result = process_upload(candidate, &policy, store.clone(), namespaces::PRODUCTS).await;
    assert!(matches!(result, Err(MediaError::ProcessingFailed(_))));

    // No namespace directory was ever created.
    assert!(!dir.path().join("products").exists());
}

#[tokio::test]
async fn test_budget_search_steps_down_on_noisy_source() {
    let data = noise_png(1200, 900);
    let mut policy = UploadPolicy::single();
    policy.variants = vec![VariantSpec::new("default", 1200, 900, 80, 20000, 20)];

    let variants = VariantTranscoder::transcode(&data, &policy).unwrap();
    let variant = &variants[0];

    // Noise at quality 80 is far over 20000 bytes, so the search must have
    // stepped down at least once.
    assert!(variant.quality < 80);
    // Budget convergence: under budget, or settled exactly at the floor.
    assert!(variant.bytes.len() <= 20000 || variant.quality == 20);

    let decoded = image::load_from_memory(&variant.bytes).unwrap();
    assert_eq!(decoded.dimensions(), (1200, 900));
}
