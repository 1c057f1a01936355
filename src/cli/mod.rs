// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::api::http_server::MULTIPART_OVERHEAD;
use crate::config::{
    ServiceConfig, StorageConfig, VendorConfig, VendorEndpoint, VendorMode,
    DEFAULT_CLIPDROP_ENDPOINT, DEFAULT_ROBOFLOW_ENDPOINT, DEFAULT_ROBOFLOW_MODEL,
    DEFAULT_SEGMIND_ENDPOINT,
};
use crate::vision::MaskOptions;

/// Exerase people-removal API
#[derive(Parser, Debug)]
#[command(name = "exerase-api")]
#[command(version)]
#[command(about = "Detect people in photos and erase them via vendor APIs", long_about = None)]
pub struct Cli {
    /// Address to listen on
    #[arg(long, env = "EXERASE_LISTEN_ADDR", default_value = "127.0.0.1:5000")]
    pub listen_addr: SocketAddr,

    /// Directory for uploads, results and scratch masks
    #[arg(long, env = "EXERASE_STORAGE_DIR", default_value = "./uploads")]
    pub storage_dir: PathBuf,

    /// Hours after which stored images are deleted
    #[arg(long, env = "STORAGE_CLEANUP_HOURS", default_value_t = 24)]
    pub retention_hours: u64,

    /// Seconds between expiry sweeps
    #[arg(long, env = "EXERASE_SWEEP_INTERVAL_SECS", default_value_t = 900)]
    pub sweep_interval_secs: u64,

    /// Maximum upload size in megabytes
    #[arg(long, env = "MAX_IMAGE_SIZE_MB", default_value_t = 10)]
    pub max_image_size_mb: usize,

    /// Timeout for each vendor request
    #[arg(long, env = "EXERASE_VENDOR_TIMEOUT_SECS", default_value_t = 60)]
    pub vendor_timeout_secs: u64,

    /// Vendor strategy: live or demo
    #[arg(long, env = "EXERASE_MODE", default_value = "live")]
    pub mode: VendorMode,

    /// Simulate vendor latency in demo mode
    #[arg(long, env = "EXERASE_DEMO_LATENCY")]
    pub demo_latency: bool,

    /// Grow each mask rectangle by this percentage of its size
    #[arg(long, env = "EXERASE_MASK_PADDING_PCT", default_value_t = 0.0)]
    pub mask_padding_pct: f64,

    /// Roboflow API key (person detection)
    #[arg(long, env = "ROBOFLOW_API_KEY", hide_env_values = true)]
    pub roboflow_api_key: Option<String>,

    /// Roboflow model id
    #[arg(long, env = "ROBOFLOW_MODEL", default_value = DEFAULT_ROBOFLOW_MODEL)]
    pub roboflow_model: String,

    #[arg(long, env = "ROBOFLOW_ENDPOINT", default_value = DEFAULT_ROBOFLOW_ENDPOINT)]
    pub roboflow_endpoint: String,

    /// ClipDrop API key (cleanup / inpainting)
    #[arg(long, env = "CLIPDROP_API_KEY", hide_env_values = true)]
    pub clipdrop_api_key: Option<String>,

    #[arg(long, env = "CLIPDROP_ENDPOINT", default_value = DEFAULT_CLIPDROP_ENDPOINT)]
    pub clipdrop_endpoint: String,

    /// Segmind API key (automatic masks)
    #[arg(long, env = "SEGMIND_API_KEY", hide_env_values = true)]
    pub segmind_api_key: Option<String>,

    #[arg(long, env = "SEGMIND_ENDPOINT", default_value = DEFAULT_SEGMIND_ENDPOINT)]
    pub segmind_endpoint: String,
}

impl Cli {
    /// Resolve flags into the service configuration
    pub fn into_config(self) -> Result<ServiceConfig> {
        if self.retention_hours == 0 {
            return Err(anyhow!("retention-hours must be at least 1"));
        }
        if self.max_image_size_mb == 0 {
            return Err(anyhow!("max-image-size-mb must be at least 1"));
        }
        if self.vendor_timeout_secs == 0 {
            return Err(anyhow!("vendor-timeout-secs must be at least 1"));
        }
        if !self.mask_padding_pct.is_finite() || self.mask_padding_pct < 0.0 {
            return Err(anyhow!(
                "mask-padding-pct must be a non-negative number, got {}",
                self.mask_padding_pct
            ));
        }

        let max_upload_bytes = self
            .max_image_size_mb
            .checked_mul(1024 * 1024)
            .filter(|bytes| bytes.checked_add(MULTIPART_OVERHEAD).is_some())
            .ok_or_else(|| {
                anyhow!(
                    "max-image-size-mb {} is too large",
                    self.max_image_size_mb
                )
            })?;
        let retention_secs = self
            .retention_hours
            .checked_mul(3600)
            .ok_or_else(|| anyhow!("retention-hours {} is too large", self.retention_hours))?;

        Ok(ServiceConfig {
            listen_addr: self.listen_addr,
            max_upload_bytes,
            storage: StorageConfig {
                root: self.storage_dir,
                retention: Duration::from_secs(retention_secs),
                sweep_interval: Duration::from_secs(self.sweep_interval_secs.max(1)),
            },
            vendors: VendorConfig {
                mode: self.mode,
                timeout: Duration::from_secs(self.vendor_timeout_secs),
                demo_latency: self.demo_latency,
                roboflow: VendorEndpoint::new(self.roboflow_endpoint, self.roboflow_api_key),
                roboflow_model: self.roboflow_model,
                clipdrop: VendorEndpoint::new(self.clipdrop_endpoint, self.clipdrop_api_key),
                segmind: VendorEndpoint::new(self.segmind_endpoint, self.segmind_api_key),
            },
            mask: MaskOptions {
                padding_pct: self.mask_padding_pct,
            },
        })
    }
}
