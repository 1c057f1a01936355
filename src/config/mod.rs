// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Service configuration
//!
//! Everything the service needs is collected here once at startup and handed
//! to constructors explicitly. Nothing below `main` reads the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::vision::MaskOptions;

pub const DEFAULT_ROBOFLOW_ENDPOINT: &str = "https://detect.roboflow.com";
pub const DEFAULT_ROBOFLOW_MODEL: &str = "people-detection-general/5";
pub const DEFAULT_CLIPDROP_ENDPOINT: &str = "https://clipdrop-api.co/cleanup/v1";
pub const DEFAULT_SEGMIND_ENDPOINT: &str = "https://api.segmind.com/v1/automatic-mask-generator";

/// How vendor adapters are built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VendorMode {
    /// Call the real vendors; each adapter still falls back when its
    /// credential is absent or the call fails
    #[default]
    Live,
    /// Never leave the process; every adapter returns its documented fallback
    Demo,
}

impl VendorMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            VendorMode::Live => "live",
            VendorMode::Demo => "demo",
        }
    }
}

impl FromStr for VendorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "live" => Ok(VendorMode::Live),
            "demo" => Ok(VendorMode::Demo),
            other => Err(format!("unknown vendor mode '{}', expected live or demo", other)),
        }
    }
}

/// Endpoint and optional credential for one vendor
#[derive(Debug, Clone)]
pub struct VendorEndpoint {
    pub endpoint: String,
    pub api_key: Option<String>,
}

impl VendorEndpoint {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: normalize_credential(api_key),
        }
    }
}

/// Treat empty and placeholder keys as "not configured"
pub fn normalize_credential(key: Option<String>) -> Option<String> {
    key.map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty() && !k.eq_ignore_ascii_case("demo"))
}

#[derive(Debug, Clone)]
pub struct VendorConfig {
    pub mode: VendorMode,
    /// Upper bound on any single vendor request
    pub timeout: Duration,
    /// Simulate vendor latency in demo mode
    pub demo_latency: bool,
    pub roboflow: VendorEndpoint,
    pub roboflow_model: String,
    pub clipdrop: VendorEndpoint,
    pub segmind: VendorEndpoint,
}

impl Default for VendorConfig {
    fn default() -> Self {
        Self {
            mode: VendorMode::Live,
            timeout: Duration::from_secs(60),
            demo_latency: false,
            roboflow: VendorEndpoint::new(DEFAULT_ROBOFLOW_ENDPOINT, None),
            roboflow_model: DEFAULT_ROBOFLOW_MODEL.to_string(),
            clipdrop: VendorEndpoint::new(DEFAULT_CLIPDROP_ENDPOINT, None),
            segmind: VendorEndpoint::new(DEFAULT_SEGMIND_ENDPOINT, None),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub root: PathBuf,
    /// Records older than this are treated as gone
    pub retention: Duration,
    pub sweep_interval: Duration,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("./uploads"),
            retention: Duration::from_secs(24 * 3600),
            sweep_interval: Duration::from_secs(15 * 60),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub listen_addr: SocketAddr,
    pub max_upload_bytes: usize,
    pub storage: StorageConfig,
    pub vendors: VendorConfig,
    pub mask: MaskOptions,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            max_upload_bytes: crate::vision::image_utils::DEFAULT_MAX_IMAGE_SIZE,
            storage: StorageConfig::default(),
            vendors: VendorConfig::default(),
            mask: MaskOptions::default(),
        }
    }
}
