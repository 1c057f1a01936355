// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Segmind automatic mask generator client
//!
//! Not part of the removal flow; available as an alternative to
//! detection-driven masks and reported by `/status`.

use anyhow::Result;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::{MaskGenerator, VendorError};
use crate::config::VendorEndpoint;
use crate::vision::detect_format;
use crate::vision::image_utils::to_base64;

const VENDOR: &str = "segmind";

#[derive(Debug, Serialize)]
struct MaskRequest {
    prompt: &'static str,
    image: String,
    threshold: f32,
    invert_mask: bool,
    return_mask: bool,
    return_alpha: bool,
    grow_mask: u32,
    seed: u64,
    base64: bool,
}

impl MaskRequest {
    fn person(image: &[u8]) -> Self {
        Self {
            prompt: "person",
            image: to_base64(image),
            threshold: 0.2,
            invert_mask: false,
            return_mask: true,
            return_alpha: false,
            grow_mask: 10,
            seed: 468685,
            base64: true,
        }
    }
}

pub struct SegmindMaskGenerator {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl SegmindMaskGenerator {
    pub fn new(config: &VendorEndpoint, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        let endpoint = config.endpoint.trim_end_matches('/').to_string();
        info!(
            "Segmind mask generator configured: endpoint={}, credential={}",
            endpoint,
            config.api_key.is_some()
        );

        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key.clone(),
        })
    }
}

/// Accept either raw image bytes or a base64 body (optionally JSON-quoted or
/// wrapped as `{"image": "..."}`)
fn decode_mask_body(body: &[u8]) -> Result<Vec<u8>, VendorError> {
    if detect_format(body).is_ok() {
        return Ok(body.to_vec());
    }

    let text = std::str::from_utf8(body)
        .map_err(|_| VendorError::malformed(VENDOR, "response is neither an image nor text"))?
        .trim();

    let encoded = match serde_json::from_str::<serde_json::Value>(text) {
        Ok(serde_json::Value::String(s)) => s,
        Ok(serde_json::Value::Object(map)) => map
            .get("image")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| VendorError::malformed(VENDOR, "JSON response has no image field"))?,
        _ => text.to_string(),
    };
    let encoded = encoded
        .split_once("base64,")
        .map(|(_, data)| data.to_string())
        .unwrap_or(encoded);

    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|e| VendorError::malformed(VENDOR, format!("invalid base64: {}", e)))?;
    detect_format(&bytes)
        .map_err(|_| VendorError::malformed(VENDOR, "decoded mask is not an image"))?;
    Ok(bytes)
}

#[async_trait]
impl MaskGenerator for SegmindMaskGenerator {
    fn provider(&self) -> &'static str {
        VENDOR
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate_mask(&self, image: &[u8]) -> Result<Vec<u8>, VendorError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(VendorError::MissingCredential(VENDOR))?;

        debug!("Segmind mask POST {} ({} bytes)", self.endpoint, image.len());

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", api_key)
            .json(&MaskRequest::person(image))
            .send()
            .await
            .map_err(|e| VendorError::transport(VENDOR, e))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            warn!("Segmind mask generation returned HTTP {}", status);
            return Err(VendorError::Status {
                vendor: VENDOR,
                status,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| VendorError::transport(VENDOR, e))?;
        decode_mask_body(&body)
    }
}
