// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Third-party AI vendor adapters
//!
//! Each adapter turns a local request into one vendor HTTP call and the
//! vendor's answer back into local data. Detection and cleanup never fail
//! outright: when the vendor cannot be used they hand back a documented
//! fallback tagged with the reason, which separates a deliberate fallback
//! (no credential, demo mode) from a failed vendor call.

pub mod clipdrop;
pub mod demo;
pub mod roboflow;
pub mod segmind;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{VendorConfig, VendorMode};
use crate::vision::Detection;

pub use clipdrop::ClipDropInpainter;
pub use demo::{DemoDetector, DemoInpainter, DemoMaskGenerator};
pub use roboflow::RoboflowDetector;
pub use segmind::SegmindMaskGenerator;

/// A vendor call that could not produce a usable answer
#[derive(Debug, Error)]
pub enum VendorError {
    #[error("{0} credential is not configured")]
    MissingCredential(&'static str),

    #[error("{0} is disabled in demo mode")]
    DemoMode(&'static str),

    #[error("{vendor} request failed: {source}")]
    Transport {
        vendor: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{vendor} returned HTTP {status}")]
    Status { vendor: &'static str, status: u16 },

    #[error("{vendor} returned an unusable response: {message}")]
    Malformed {
        vendor: &'static str,
        message: String,
    },
}

impl VendorError {
    /// Wrap a reqwest error without leaking query-string credentials
    pub fn transport(vendor: &'static str, source: reqwest::Error) -> Self {
        VendorError::Transport {
            vendor,
            source: source.without_url(),
        }
    }

    pub fn malformed(vendor: &'static str, message: impl Into<String>) -> Self {
        VendorError::Malformed {
            vendor,
            message: message.into(),
        }
    }
}

/// Why an adapter answered with its fallback instead of vendor data
#[derive(Debug)]
pub enum FallbackReason {
    MissingCredential,
    DemoMode,
    Failed(VendorError),
}

impl FallbackReason {
    pub fn code(&self) -> &'static str {
        match self {
            FallbackReason::MissingCredential => "missing_credential",
            FallbackReason::DemoMode => "demo_mode",
            FallbackReason::Failed(_) => "vendor_error",
        }
    }

    /// True when the fallback was chosen on purpose rather than forced by an error
    pub fn is_by_design(&self) -> bool {
        !matches!(self, FallbackReason::Failed(_))
    }
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::MissingCredential => write!(f, "vendor credential not configured"),
            FallbackReason::DemoMode => write!(f, "demo mode"),
            FallbackReason::Failed(e) => write!(f, "{}", e),
        }
    }
}

/// Result of a vendor call that always yields a value
#[derive(Debug)]
pub enum VendorOutcome<T> {
    Live(T),
    Fallback { value: T, reason: FallbackReason },
}

impl<T> VendorOutcome<T> {
    pub fn value(&self) -> &T {
        match self {
            VendorOutcome::Live(value) | VendorOutcome::Fallback { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        self.into_parts().0
    }

    pub fn into_parts(self) -> (T, Option<FallbackReason>) {
        match self {
            VendorOutcome::Live(value) => (value, None),
            VendorOutcome::Fallback { value, reason } => (value, Some(reason)),
        }
    }

    pub fn fallback_reason(&self) -> Option<&FallbackReason> {
        match self {
            VendorOutcome::Live(_) => None,
            VendorOutcome::Fallback { reason, .. } => Some(reason),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.fallback_reason().is_some()
    }
}

/// Speed/quality trade-off for the cleanup vendor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityMode {
    #[default]
    Fast,
    Quality,
}

#[derive(Debug, Error, PartialEq)]
#[error("unknown quality mode '{0}', expected 'fast' or 'quality'")]
pub struct UnknownQualityMode(pub String);

impl QualityMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityMode::Fast => "fast",
            QualityMode::Quality => "quality",
        }
    }
}

impl FromStr for QualityMode {
    type Err = UnknownQualityMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fast" => Ok(QualityMode::Fast),
            // "high" is what the web client sends
            "quality" | "high" => Ok(QualityMode::Quality),
            other => Err(UnknownQualityMode(other.to_string())),
        }
    }
}

/// Locates people in an image
#[async_trait]
pub trait PersonDetector: Send + Sync {
    fn provider(&self) -> &'static str;
    fn is_configured(&self) -> bool;
    async fn detect(&self, image: &[u8]) -> VendorOutcome<Vec<Detection>>;
}

/// Erases the white region of a mask from an image
#[async_trait]
pub trait Inpainter: Send + Sync {
    fn provider(&self) -> &'static str;
    fn is_configured(&self) -> bool;
    async fn remove(&self, image: &[u8], mask: &[u8], mode: QualityMode)
        -> VendorOutcome<Vec<u8>>;
}

/// Produces a person mask without a prior detection step
#[async_trait]
pub trait MaskGenerator: Send + Sync {
    fn provider(&self) -> &'static str;
    fn is_configured(&self) -> bool;
    async fn generate_mask(&self, image: &[u8]) -> Result<Vec<u8>, VendorError>;
}

/// The adapters handed to request handlers
#[derive(Clone)]
pub struct Vendors {
    pub detector: Arc<dyn PersonDetector>,
    pub inpainter: Arc<dyn Inpainter>,
    pub mask_generator: Arc<dyn MaskGenerator>,
}

impl Vendors {
    /// Build the adapter set selected by `config.mode`
    pub fn from_config(config: &VendorConfig) -> Result<Self> {
        match config.mode {
            VendorMode::Live => Ok(Self {
                detector: Arc::new(RoboflowDetector::new(
                    &config.roboflow,
                    &config.roboflow_model,
                    config.timeout,
                )?),
                inpainter: Arc::new(ClipDropInpainter::new(&config.clipdrop, config.timeout)?),
                mask_generator: Arc::new(SegmindMaskGenerator::new(
                    &config.segmind,
                    config.timeout,
                )?),
            }),
            VendorMode::Demo => Ok(Self::demo(config.demo_latency)),
        }
    }

    pub fn demo(simulate_latency: bool) -> Self {
        Self {
            detector: Arc::new(DemoDetector::new(simulate_latency)),
            inpainter: Arc::new(DemoInpainter::new(simulate_latency)),
            mask_generator: Arc::new(DemoMaskGenerator),
        }
    }
}
