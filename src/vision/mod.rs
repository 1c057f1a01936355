// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Local image handling around the vendor calls
//!
//! This module provides:
//! - Detector box normalization into percentage rectangles
//! - Removal mask synthesis from selected detections
//! - Image decoding, format detection and data-URI encoding
//!
//! Detection and inpainting themselves happen at the vendors (see `vendors`).

pub mod coordinates;
pub mod detection;
pub mod image_utils;
pub mod mask;

pub use coordinates::{normalize, GeometryError, PercentRect, PixelRect};
pub use detection::{fallback_detections, Detection};
pub use image_utils::{
    decode_image_bytes, detect_format, image_dimensions, to_data_uri, ImageError, ImageInfo,
    SupportedFormat,
};
pub use mask::{encode_png, synthesize, synthesize_with, MaskError, MaskOptions};
