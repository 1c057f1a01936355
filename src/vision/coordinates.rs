// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Conversion from detector pixel boxes to percentage rectangles

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("image dimensions must be non-zero, got {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    #[error("invalid bounding box: {0}")]
    InvalidBox(String),
}

/// Rectangle expressed as percentages of the image dimensions.
///
/// `x`/`y` locate the top-left corner. All four values are in the 0..=100
/// range once produced by [`normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Convert a center-anchored pixel box into a top-left percentage rectangle.
///
/// The near edges are clamped to 0. The extents are then clamped so the
/// rectangle never runs past the far image edge (`x + width <= 100`).
pub fn normalize(
    center_x: f64,
    center_y: f64,
    box_width: f64,
    box_height: f64,
    image_width: u32,
    image_height: u32,
) -> Result<PercentRect, GeometryError> {
    if image_width == 0 || image_height == 0 {
        return Err(GeometryError::EmptyImage {
            width: image_width,
            height: image_height,
        });
    }

    for (name, value) in [
        ("center_x", center_x),
        ("center_y", center_y),
        ("width", box_width),
        ("height", box_height),
    ] {
        if !value.is_finite() {
            return Err(GeometryError::InvalidBox(format!(
                "{} is not a finite number",
                name
            )));
        }
    }
    if box_width < 0.0 || box_height < 0.0 {
        return Err(GeometryError::InvalidBox(format!(
            "negative extent {}x{}",
            box_width, box_height
        )));
    }

    let image_width = f64::from(image_width);
    let image_height = f64::from(image_height);

    let x = ((center_x - box_width / 2.0) / image_width * 100.0).max(0.0);
    let y = ((center_y - box_height / 2.0) / image_height * 100.0).max(0.0);
    let width = (box_width / image_width * 100.0).min((100.0 - x).max(0.0));
    let height = (box_height / image_height * 100.0).min((100.0 - y).max(0.0));

    Ok(PercentRect {
        x,
        y,
        width,
        height,
    })
}

/// Pixel rectangle recovered from a [`PercentRect`] by truncation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PercentRect {
    /// Map back to pixels, truncating toward zero
    pub fn to_pixels(&self, image_width: u32, image_height: u32) -> PixelRect {
        let scale = |pct: f64, dim: u32| -> u32 {
            // `as` saturates: negatives and NaN become 0
            (pct / 100.0 * f64::from(dim)) as u32
        };
        PixelRect {
            x: scale(self.x, image_width),
            y: scale(self.y, image_height),
            width: scale(self.width, image_width),
            height: scale(self.height, image_height),
        }
    }

    /// Grow the rectangle around its centre by `pct` percent of its own size
    pub fn padded(&self, pct: f64) -> PercentRect {
        if pct <= 0.0 {
            return *self;
        }
        let factor = 1.0 + pct / 100.0;
        let width = self.width * factor;
        let height = self.height * factor;
        PercentRect {
            x: (self.x - (width - self.width) / 2.0).max(0.0),
            y: (self.y - (height - self.height) / 2.0).max(0.0),
            width,
            height,
        }
    }
}
