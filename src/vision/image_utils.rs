// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image loading and encoding helpers for uploads, vendor payloads and responses

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{DynamicImage, ImageFormat};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default upload limit (10MB)
pub const DEFAULT_MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;

/// Custom error types for image processing
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Image data is too large: {0} bytes (max: {1} bytes)")]
    TooLarge(usize, usize),

    #[error("Invalid base64 encoding: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("Unsupported image format")]
    UnsupportedFormat,

    #[error("Failed to decode image: {0}")]
    DecodeFailed(String),

    #[error("Image data is empty")]
    EmptyData,
}

/// Image formats this service accepts and stores.
///
/// Serialized into storage metadata so a record always knows its own
/// encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportedFormat {
    Png,
    Jpeg,
    Webp,
    Gif,
    Bmp,
    Tiff,
}

impl SupportedFormat {
    pub fn extension(self) -> &'static str {
        match self {
            SupportedFormat::Png => "png",
            SupportedFormat::Jpeg => "jpg",
            SupportedFormat::Webp => "webp",
            SupportedFormat::Gif => "gif",
            SupportedFormat::Bmp => "bmp",
            SupportedFormat::Tiff => "tiff",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            SupportedFormat::Png => "image/png",
            SupportedFormat::Jpeg => "image/jpeg",
            SupportedFormat::Webp => "image/webp",
            SupportedFormat::Gif => "image/gif",
            SupportedFormat::Bmp => "image/bmp",
            SupportedFormat::Tiff => "image/tiff",
        }
    }

    pub fn image_format(self) -> ImageFormat {
        match self {
            SupportedFormat::Png => ImageFormat::Png,
            SupportedFormat::Jpeg => ImageFormat::Jpeg,
            SupportedFormat::Webp => ImageFormat::WebP,
            SupportedFormat::Gif => ImageFormat::Gif,
            SupportedFormat::Bmp => ImageFormat::Bmp,
            SupportedFormat::Tiff => ImageFormat::Tiff,
        }
    }
}

/// Image information extracted during loading
#[derive(Debug, Clone)]
pub struct ImageInfo {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Detected format
    pub format: SupportedFormat,
    /// Size in bytes
    pub size_bytes: usize,
}

/// Decode raw image bytes (for multipart uploads and stored originals)
///
/// # Arguments
/// * `bytes` - Raw image bytes
/// * `max_size` - Upper bound on `bytes.len()`
///
/// # Returns
/// * `Ok((DynamicImage, ImageInfo))` - The decoded image and metadata
/// * `Err(ImageError)` - If decoding fails
pub fn decode_image_bytes(
    bytes: &[u8],
    max_size: usize,
) -> Result<(DynamicImage, ImageInfo), ImageError> {
    if bytes.len() > max_size {
        return Err(ImageError::TooLarge(bytes.len(), max_size));
    }

    if bytes.is_empty() {
        return Err(ImageError::EmptyData);
    }

    let format = detect_format(bytes)?;

    let img = image::load_from_memory_with_format(bytes, format.image_format())
        .map_err(|e| ImageError::DecodeFailed(e.to_string()))?;

    let info = ImageInfo {
        width: img.width(),
        height: img.height(),
        format,
        size_bytes: bytes.len(),
    };

    Ok((img, info))
}

/// Read only the pixel dimensions of an encoded image
pub fn image_dimensions(bytes: &[u8]) -> Result<(u32, u32), ImageError> {
    let format = detect_format(bytes)?;
    let reader = image::ImageReader::with_format(std::io::Cursor::new(bytes), format.image_format());
    reader
        .into_dimensions()
        .map_err(|e| ImageError::DecodeFailed(e.to_string()))
}

/// Detect image format from magic bytes
///
/// # Arguments
/// * `bytes` - Raw image data
///
/// # Returns
/// * `Ok(SupportedFormat)` - Detected format
/// * `Err(ImageError::UnsupportedFormat)` - If format cannot be detected
pub fn detect_format(bytes: &[u8]) -> Result<SupportedFormat, ImageError> {
    if bytes.len() < 4 {
        return Err(ImageError::UnsupportedFormat);
    }

    match bytes {
        // PNG: 89 50 4E 47 (0x89 P N G)
        [0x89, 0x50, 0x4E, 0x47, ..] => Ok(SupportedFormat::Png),

        // JPEG: FF D8 FF
        [0xFF, 0xD8, 0xFF, ..] => Ok(SupportedFormat::Jpeg),

        // WebP: RIFF .... WEBP
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => {
            Ok(SupportedFormat::Webp)
        }

        // GIF: GIF87a or GIF89a
        [0x47, 0x49, 0x46, 0x38, x, ..] if *x == 0x37 || *x == 0x39 => Ok(SupportedFormat::Gif),

        // BMP: BM
        [0x42, 0x4D, ..] => Ok(SupportedFormat::Bmp),

        // TIFF: II (little-endian) or MM (big-endian)
        [0x49, 0x49, 0x2A, 0x00, ..] | [0x4D, 0x4D, 0x00, 0x2A, ..] => Ok(SupportedFormat::Tiff),

        _ => Err(ImageError::UnsupportedFormat),
    }
}

/// Encode bytes as a `data:` URI suitable for an `<img src>`
pub fn to_data_uri(bytes: &[u8], format: SupportedFormat) -> String {
    format!("data:{};base64,{}", format.mime_type(), STANDARD.encode(bytes))
}

/// Plain base64 (no data-URI prefix), as vendors expect
pub fn to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}
