// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! POST /upload

use super::support::*;
use axum::http::StatusCode;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::ImageFormat;

#[tokio::test]
async fn test_upload_png_returns_id_and_preview() {
    let app = TestApp::demo().await;
    let bytes = png_bytes(40, 30);

    let response = app.upload("photo.png", "image/png", &bytes).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["width"], 40);
    assert_eq!(json["height"], 30);
    assert_eq!(json["format"], "png");
    assert!(!json["file_id"].as_str().unwrap().is_empty());

    let data_uri = json["image_data"].as_str().unwrap();
    let encoded = data_uri.strip_prefix("data:image/png;base64,").unwrap();
    assert_eq!(STANDARD.decode(encoded).unwrap(), bytes);
}

#[tokio::test]
async fn test_upload_jpeg_keeps_format() {
    let app = TestApp::demo().await;
    let response = app
        .upload("photo.jpg", "image/jpeg", &encoded(16, 16, ImageFormat::Jpeg))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["format"], "jpeg");
    assert!(json["image_data"]
        .as_str()
        .unwrap()
        .starts_with("data:image/jpeg;base64,"));
}

#[tokio::test]
async fn test_upload_rejects_non_image_content_type() {
    let app = TestApp::demo().await;
    let response = app
        .upload("notes.txt", "text/plain", b"hello there")
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["error_type"], "validation_error");
    assert_eq!(json["details"]["field"], "image");
}

#[tokio::test]
async fn test_upload_rejects_undecodable_bytes() {
    let app = TestApp::demo().await;
    let response = app
        .upload("fake.png", "image/png", b"this is not a png")
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_without_image_field() {
    let app = TestApp::demo().await;
    let response = app
        .send(multipart_request("document", "photo.png", "image/png", &png_bytes(2, 2)))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_too_large_is_413() {
    let app = TestApp::with_config(exerase_api::Vendors::demo(false), |config| {
        config.max_upload_bytes = 16;
    })
    .await;

    let response = app
        .upload("big.png", "image/png", &png_bytes(64, 64))
        .await;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(json_body(response).await["error_type"], "payload_too_large");
}
