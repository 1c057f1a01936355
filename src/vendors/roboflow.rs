// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Roboflow person-detection client

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::{FallbackReason, PersonDetector, VendorError, VendorOutcome};
use crate::config::VendorEndpoint;
use crate::vision::image_utils::to_base64;
use crate::vision::{fallback_detections, normalize, Detection};

const VENDOR: &str = "roboflow";

/// Classes kept from the detector output; predictions without a class are kept too
const PERSON_CLASSES: &[&str] = &["person", "people"];

#[derive(Debug, Deserialize)]
struct RoboflowResponse {
    #[serde(default)]
    predictions: Vec<RoboflowPrediction>,
    image: Option<RoboflowImage>,
}

#[derive(Debug, Deserialize)]
struct RoboflowImage {
    width: f64,
    height: f64,
}

/// One raw prediction: center-anchored pixel box
#[derive(Debug, Deserialize)]
struct RoboflowPrediction {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    confidence: f64,
    #[serde(default)]
    class: Option<String>,
}

/// Client for a Roboflow hosted detection model
pub struct RoboflowDetector {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl RoboflowDetector {
    pub fn new(config: &VendorEndpoint, model: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        let endpoint = config.endpoint.trim_end_matches('/').to_string();
        let model = model.trim_matches('/').to_string();
        info!(
            "Roboflow detector configured: endpoint={}, model={}, credential={}",
            endpoint,
            model,
            config.api_key.is_some()
        );

        Ok(Self {
            client,
            endpoint,
            model,
            api_key: config.api_key.clone(),
        })
    }

    async fn request_detections(
        &self,
        api_key: &str,
        image: &[u8],
    ) -> Result<Vec<Detection>, VendorError> {
        let url = format!("{}/{}", self.endpoint, self.model);
        debug!("Roboflow detect POST {} ({} bytes)", url, image.len());

        let response = self
            .client
            .post(&url)
            .query(&[("api_key", api_key)])
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(to_base64(image))
            .send()
            .await
            .map_err(|e| VendorError::transport(VENDOR, e))?;

        if !response.status().is_success() {
            return Err(VendorError::Status {
                vendor: VENDOR,
                status: response.status().as_u16(),
            });
        }

        let body: RoboflowResponse = response
            .json()
            .await
            .map_err(|e| VendorError::malformed(VENDOR, e.without_url().to_string()))?;

        parse_detections(body)
    }
}

/// Convert a vendor response into percentage detections with ids 1..=n
fn parse_detections(body: RoboflowResponse) -> Result<Vec<Detection>, VendorError> {
    let image = body
        .image
        .ok_or_else(|| VendorError::malformed(VENDOR, "missing image dimensions"))?;
    if !(image.width >= 1.0 && image.height >= 1.0) {
        return Err(VendorError::malformed(
            VENDOR,
            format!("invalid image dimensions {}x{}", image.width, image.height),
        ));
    }
    let (image_width, image_height) = (image.width as u32, image.height as u32);

    let mut people = Vec::new();
    for prediction in body.predictions.into_iter().filter(|p| {
        p.class
            .as_deref()
            .map_or(true, |c| PERSON_CLASSES.contains(&c.to_lowercase().as_str()))
    }) {
        let rect = normalize(
            prediction.x,
            prediction.y,
            prediction.width,
            prediction.height,
            image_width,
            image_height,
        )
        .map_err(|e| VendorError::malformed(VENDOR, e.to_string()))?;

        let id = people.len() as u32 + 1;
        people.push(Detection::new(
            id,
            rect,
            prediction.confidence.clamp(0.0, 1.0),
        ));
    }

    Ok(people)
}

#[async_trait]
impl PersonDetector for RoboflowDetector {
    fn provider(&self) -> &'static str {
        VENDOR
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn detect(&self, image: &[u8]) -> VendorOutcome<Vec<Detection>> {
        let Some(api_key) = self.api_key.as_deref() else {
            debug!("Roboflow credential absent, using fallback detections");
            return VendorOutcome::Fallback {
                value: fallback_detections(),
                reason: FallbackReason::MissingCredential,
            };
        };

        match self.request_detections(api_key, image).await {
            Ok(people) => {
                info!("Roboflow detected {} people", people.len());
                VendorOutcome::Live(people)
            }
            Err(e) => {
                warn!("Roboflow detection failed, using fallback detections: {}", e);
                VendorOutcome::Fallback {
                    value: fallback_detections(),
                    reason: FallbackReason::Failed(e),
                }
            }
        }
    }
}
