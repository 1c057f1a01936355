// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Service status handler

use axum::{extract::State, Json};
use std::collections::BTreeMap;

use super::response::{StatusResponse, VendorStatus};
use crate::api::http_server::AppState;
use crate::version;

fn vendor_status(provider: &str, configured: bool, role: &str) -> VendorStatus {
    VendorStatus {
        provider: provider.to_string(),
        configured,
        role: role.to_string(),
    }
}

/// GET /status - Report mode, vendor configuration and routes
pub async fn status_handler(State(state): State<AppState>) -> Json<StatusResponse> {
    let vendors = &state.vendors;

    let mut ai_services = BTreeMap::new();
    ai_services.insert(
        "detection".to_string(),
        vendor_status(
            vendors.detector.provider(),
            vendors.detector.is_configured(),
            "person detection",
        ),
    );
    ai_services.insert(
        "cleanup".to_string(),
        vendor_status(
            vendors.inpainter.provider(),
            vendors.inpainter.is_configured(),
            "people removal (inpainting)",
        ),
    );
    ai_services.insert(
        "auto_mask".to_string(),
        vendor_status(
            vendors.mask_generator.provider(),
            vendors.mask_generator.is_configured(),
            "automatic person masks",
        ),
    );

    let endpoints = [
        ("POST /upload", "Upload an image (multipart field 'image')"),
        ("POST /detect-people", "Detect people in an uploaded image"),
        ("POST /remove-people", "Erase selected people"),
        ("GET /download/{result_id}", "Download a processed image"),
        ("GET /status", "Service status"),
    ]
    .into_iter()
    .map(|(route, description)| (route.to_string(), description.to_string()))
    .collect();

    Json(StatusResponse {
        status: "running".to_string(),
        service: version::SERVICE_NAME.to_string(),
        version: version::VERSION.to_string(),
        mode: state.config.vendors.mode.as_str().to_string(),
        features: version::FEATURES.iter().map(|f| f.to_string()).collect(),
        ai_services,
        endpoints,
    })
}
