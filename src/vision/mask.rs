// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Removal mask synthesis
//!
//! Cleanup vendors expect a mask the same size as the source image where
//! white pixels are erased and black pixels are kept.

use std::collections::HashSet;
use std::io::Cursor;

use image::{ImageFormat, Rgb, RgbImage};
use thiserror::Error;

use super::detection::Detection;

const KEEP: Rgb<u8> = Rgb([0, 0, 0]);
const ERASE: Rgb<u8> = Rgb([255, 255, 255]);

#[derive(Debug, Error)]
pub enum MaskError {
    #[error("mask dimensions must be non-zero, got {0}x{1}")]
    EmptyCanvas(u32, u32),

    #[error("failed to encode mask: {0}")]
    Encode(#[from] image::ImageError),
}

/// Tuning for mask synthesis
#[derive(Debug, Clone, Copy, Default)]
pub struct MaskOptions {
    /// Grow each selected box by this percentage of its own size
    pub padding_pct: f64,
}

/// Rasterize a removal mask for the selected detections.
///
/// Each selected box covers the half-open pixel range `[x, x + w)` by
/// `[y, y + h)` after truncating the percentages to pixels, clipped to the
/// canvas. Detections that are not selected stay black.
pub fn synthesize(
    width: u32,
    height: u32,
    detections: &[Detection],
    selected_ids: &HashSet<u32>,
) -> Result<RgbImage, MaskError> {
    synthesize_with(width, height, detections, selected_ids, MaskOptions::default())
}

pub fn synthesize_with(
    width: u32,
    height: u32,
    detections: &[Detection],
    selected_ids: &HashSet<u32>,
    options: MaskOptions,
) -> Result<RgbImage, MaskError> {
    if width == 0 || height == 0 {
        return Err(MaskError::EmptyCanvas(width, height));
    }

    let mut mask = RgbImage::from_pixel(width, height, KEEP);

    for detection in detections
        .iter()
        .filter(|d| selected_ids.contains(&d.id))
    {
        let px = detection
            .rect()
            .padded(options.padding_pct)
            .to_pixels(width, height);

        let x_end = px.x.saturating_add(px.width).min(width);
        let y_end = px.y.saturating_add(px.height).min(height);
        for y in px.y..y_end {
            for x in px.x..x_end {
                mask.put_pixel(x, y, ERASE);
            }
        }
    }

    Ok(mask)
}

/// Encode a mask as PNG bytes
pub fn encode_png(mask: &RgbImage) -> Result<Vec<u8>, MaskError> {
    let mut buffer = Cursor::new(Vec::new());
    mask.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(buffer.into_inner())
}
