// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Offline adapters for demos
//!
//! Same contracts as the HTTP adapters, answering with the documented
//! fallbacks tagged `DemoMode`. With latency enabled they sleep roughly as
//! long as the real vendors take.

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use super::{
    FallbackReason, Inpainter, MaskGenerator, PersonDetector, QualityMode, VendorError,
    VendorOutcome,
};
use crate::vision::{fallback_detections, Detection};

const PROVIDER: &str = "demo";

const DETECT_LATENCY: Duration = Duration::from_secs(2);
const FAST_REMOVE_LATENCY: Duration = Duration::from_secs(3);
const QUALITY_REMOVE_LATENCY: Duration = Duration::from_secs(6);

pub struct DemoDetector {
    latency: Duration,
}

impl DemoDetector {
    pub fn new(simulate_latency: bool) -> Self {
        Self {
            latency: if simulate_latency {
                DETECT_LATENCY
            } else {
                Duration::ZERO
            },
        }
    }
}

#[async_trait]
impl PersonDetector for DemoDetector {
    fn provider(&self) -> &'static str {
        PROVIDER
    }

    fn is_configured(&self) -> bool {
        false
    }

    async fn detect(&self, _image: &[u8]) -> VendorOutcome<Vec<Detection>> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        debug!("Demo detector returning fixed detections");
        VendorOutcome::Fallback {
            value: fallback_detections(),
            reason: FallbackReason::DemoMode,
        }
    }
}

pub struct DemoInpainter {
    simulate_latency: bool,
}

impl DemoInpainter {
    pub fn new(simulate_latency: bool) -> Self {
        Self { simulate_latency }
    }

    fn latency(&self, mode: QualityMode) -> Duration {
        match (self.simulate_latency, mode) {
            (false, _) => Duration::ZERO,
            (true, QualityMode::Fast) => FAST_REMOVE_LATENCY,
            (true, QualityMode::Quality) => QUALITY_REMOVE_LATENCY,
        }
    }
}

#[async_trait]
impl Inpainter for DemoInpainter {
    fn provider(&self) -> &'static str {
        PROVIDER
    }

    fn is_configured(&self) -> bool {
        false
    }

    async fn remove(
        &self,
        image: &[u8],
        _mask: &[u8],
        mode: QualityMode,
    ) -> VendorOutcome<Vec<u8>> {
        let latency = self.latency(mode);
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        debug!("Demo inpainter returning original image");
        VendorOutcome::Fallback {
            value: image.to_vec(),
            reason: FallbackReason::DemoMode,
        }
    }
}

pub struct DemoMaskGenerator;

#[async_trait]
impl MaskGenerator for DemoMaskGenerator {
    fn provider(&self) -> &'static str {
        PROVIDER
    }

    fn is_configured(&self) -> bool {
        false
    }

    async fn generate_mask(&self, _image: &[u8]) -> Result<Vec<u8>, VendorError> {
        Err(VendorError::DemoMode("automatic mask generation"))
    }
}
