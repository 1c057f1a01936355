// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! ClipDrop cleanup (inpainting) client

use anyhow::Result;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::{FallbackReason, Inpainter, QualityMode, VendorError, VendorOutcome};
use crate::config::VendorEndpoint;
use crate::vision::{detect_format, SupportedFormat};

const VENDOR: &str = "clipdrop";

/// Client for the ClipDrop cleanup endpoint
pub struct ClipDropInpainter {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl ClipDropInpainter {
    pub fn new(config: &VendorEndpoint, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        let endpoint = config.endpoint.trim_end_matches('/').to_string();
        info!(
            "ClipDrop cleanup configured: endpoint={}, credential={}",
            endpoint,
            config.api_key.is_some()
        );

        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key.clone(),
        })
    }

    async fn request_cleanup(
        &self,
        api_key: &str,
        image: &[u8],
        mask: &[u8],
        mode: QualityMode,
    ) -> Result<Vec<u8>, VendorError> {
        let image_format = detect_format(image).unwrap_or(SupportedFormat::Jpeg);
        let image_part = Part::bytes(image.to_vec())
            .file_name(format!("image.{}", image_format.extension()))
            .mime_str(image_format.mime_type())
            .map_err(|e| VendorError::transport(VENDOR, e))?;
        let mask_part = Part::bytes(mask.to_vec())
            .file_name("mask.png")
            .mime_str(SupportedFormat::Png.mime_type())
            .map_err(|e| VendorError::transport(VENDOR, e))?;

        let form = Form::new()
            .part("image_file", image_part)
            .part("mask_file", mask_part)
            .text("mode", mode.as_str());

        debug!(
            "ClipDrop cleanup POST {} (image {} bytes, mask {} bytes, mode {})",
            self.endpoint,
            image.len(),
            mask.len(),
            mode.as_str()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| VendorError::transport(VENDOR, e))?;

        if !response.status().is_success() {
            return Err(VendorError::Status {
                vendor: VENDOR,
                status: response.status().as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| VendorError::transport(VENDOR, e))?;

        detect_format(&bytes)
            .map_err(|_| VendorError::malformed(VENDOR, "response body is not an image"))?;

        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl Inpainter for ClipDropInpainter {
    fn provider(&self) -> &'static str {
        VENDOR
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn remove(
        &self,
        image: &[u8],
        mask: &[u8],
        mode: QualityMode,
    ) -> VendorOutcome<Vec<u8>> {
        let Some(api_key) = self.api_key.as_deref() else {
            debug!("ClipDrop credential absent, returning original image");
            return VendorOutcome::Fallback {
                value: image.to_vec(),
                reason: FallbackReason::MissingCredential,
            };
        };

        match self.request_cleanup(api_key, image, mask, mode).await {
            Ok(cleaned) => {
                info!("ClipDrop cleanup returned {} bytes", cleaned.len());
                VendorOutcome::Live(cleaned)
            }
            Err(e) => {
                warn!("ClipDrop cleanup failed, returning original image: {}", e);
                VendorOutcome::Fallback {
                    value: image.to_vec(),
                    reason: FallbackReason::Failed(e),
                }
            }
        }
    }
}
