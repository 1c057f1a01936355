// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Segmind mask generator against a fake API

use super::fake_server::{png_bytes, spawn};
use axum::{
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use exerase_api::{
    config::VendorEndpoint,
    vendors::{MaskGenerator, SegmindMaskGenerator, VendorError},
};
use serde_json::{json, Value};
use std::time::Duration;

fn generator(base: &str, key: Option<&str>) -> SegmindMaskGenerator {
    SegmindMaskGenerator::new(
        &VendorEndpoint::new(format!("{}/automatic-mask-generator", base), key.map(str::to_string)),
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn test_generate_mask_decodes_base64_reply() {
    let base = spawn(Router::new().route(
        "/automatic-mask-generator",
        post(|headers: HeaderMap, Json(body): Json<Value>| async move {
            if headers.get("x-api-key").map(|v| v.as_bytes()) != Some(b"sm-key".as_slice())
                || body["prompt"] != "person"
                || body["base64"] != true
            {
                return Err(StatusCode::BAD_REQUEST);
            }
            Ok(Json(json!({ "image": STANDARD.encode(png_bytes(4, 4)) })))
        }),
    ))
    .await;

    let mask = generator(&base, Some("sm-key"))
        .generate_mask(&png_bytes(4, 4))
        .await
        .unwrap();
    assert_eq!(mask, png_bytes(4, 4));
}

#[tokio::test]
async fn test_vendor_error_is_surfaced() {
    let base = spawn(Router::new().route(
        "/automatic-mask-generator",
        post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    ))
    .await;

    let result = generator(&base, Some("sm-key"))
        .generate_mask(&png_bytes(4, 4))
        .await;
    assert!(matches!(result, Err(VendorError::Status { status: 500, .. })));
}

#[tokio::test]
async fn test_missing_credential_is_unavailable() {
    let generator = generator("http://127.0.0.1:9", None);
    assert!(!generator.is_configured());
    assert!(matches!(
        generator.generate_mask(&png_bytes(2, 2)).await,
        Err(VendorError::MissingCredential(_))
    ));
}
