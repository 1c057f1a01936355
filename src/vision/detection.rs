// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Person detection records shared by the detector and the mask synthesizer

use serde::{Deserialize, Serialize};

use super::coordinates::PercentRect;

/// One located person. Coordinates are percentages of the image size with
/// the origin at the top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub confidence: f64,
}

impl Detection {
    pub fn new(id: u32, rect: PercentRect, confidence: f64) -> Self {
        Self {
            id,
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            confidence,
        }
    }

    pub fn rect(&self) -> PercentRect {
        PercentRect {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }
}

/// Fixed detection list returned whenever the detector cannot be reached.
/// Stable across calls so demos and tests can rely on it.
pub fn fallback_detections() -> Vec<Detection> {
    vec![
        Detection {
            id: 1,
            x: 25.0,
            y: 30.0,
            width: 20.0,
            height: 40.0,
            confidence: 0.95,
        },
        Detection {
            id: 2,
            x: 55.0,
            y: 25.0,
            width: 18.0,
            height: 45.0,
            confidence: 0.88,
        },
        Detection {
            id: 3,
            x: 75.0,
            y: 35.0,
            width: 15.0,
            height: 35.0,
            confidence: 0.92,
        },
    ]
}
