//! Variant encoders.
//!
//! One function per output container. Both encoders take an explicit quality
//! so the byte-budget search in the transcoder can re-encode at decreasing
//! quality without re-decoding or re-resizing.

use anyhow::Result;
use bytes::Bytes;
use image::DynamicImage;
use vitrine_core::VariantFormat;

/// Encode `img` in the policy's output container at the given quality (1-100).
pub fn encode_variant(img: &DynamicImage, format: VariantFormat, quality: u8) -> Result<Bytes> {
    match format {
        VariantFormat::Jpeg => encode_jpeg(img, quality),
        VariantFormat::WebP => encode_webp(img, quality),
    }
}

/// Encode to JPEG using mozjpeg
fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Bytes> {
    let rgb_img = img.to_rgb8();
    let (width, height) = rgb_img.dimensions();

    let mut comp = mozjpeg::Compress::new(mozjpeg::ColorSpace::JCS_RGB);
    comp.set_size(width as usize, height as usize);
    comp.set_quality(quality as f32);
    comp.set_progressive_mode();
    comp.set_optimize_coding(true);

    let mut comp = comp.start_compress(Vec::new())?;
    comp.write_scanlines(&rgb_img)?;
    let jpeg_data = comp.finish()?;

    Ok(Bytes::from(jpeg_data))
}

/// Encode to WebP
fn encode_webp(img: &DynamicImage, quality: u8) -> Result<Bytes> {
    let rgba_img = img.to_rgba8();
    let (width, height) = rgba_img.dimensions();

    let encoder = webp::Encoder::from_rgba(&rgba_img, width, height);
    let webp_data = encoder.encode(quality as f32);

    Ok(Bytes::copy_from_slice(&webp_data))
}
