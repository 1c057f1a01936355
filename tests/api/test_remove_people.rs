// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! POST /remove-people

use super::support::*;
use axum::http::StatusCode;
use exerase_api::vendors::{FallbackReason, QualityMode, VendorError, VendorOutcome};
use image::Rgb;
use serde_json::json;
use std::sync::{Arc, Mutex};

fn people_data() -> serde_json::Value {
    json!([
        { "id": 1, "x": 0, "y": 0, "width": 50, "height": 50, "confidence": 0.9 },
        { "id": 2, "x": 60, "y": 60, "width": 20, "height": 20, "confidence": 0.8 }
    ])
}

#[tokio::test]
async fn test_empty_selection_is_400_without_vendor_call() {
    let app = TestApp::mocked(unused_detector(), unused_cleanup()).await;
    let file_id = app.upload_png(10, 10).await;

    let response = app
        .post_json(
            "/remove-people",
            json!({ "file_id": file_id, "selected_people": [], "people_data": people_data() }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["details"]["field"], "selected_people");
    assert_eq!(app.scratch_entries(), 0);
}

#[tokio::test]
async fn test_unknown_quality_mode_is_400() {
    let app = TestApp::mocked(unused_detector(), unused_cleanup()).await;
    let file_id = app.upload_png(10, 10).await;

    let response = app
        .post_json(
            "/remove-people",
            json!({
                "file_id": file_id,
                "selected_people": [1],
                "people_data": people_data(),
                "quality_mode": "ultra"
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_selection_absent_from_people_data_is_400() {
    let app = TestApp::mocked(unused_detector(), unused_cleanup()).await;
    let file_id = app.upload_png(10, 10).await;

    let response = app
        .post_json(
            "/remove-people",
            json!({ "file_id": file_id, "selected_people": [9], "people_data": people_data() }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_file_is_404() {
    let app = TestApp::mocked(unused_detector(), unused_cleanup()).await;
    let response = app
        .post_json(
            "/remove-people",
            json!({
                "file_id": "5d0f3a4e-1b2c-4d5e-8f90-a1b2c3d4e5f6",
                "selected_people": [1],
                "people_data": people_data()
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_removal_sends_mask_and_stores_result() {
    let seen: Arc<Mutex<Option<(Vec<u8>, QualityMode)>>> = Arc::new(Mutex::new(None));
    let recorder = seen.clone();

    let mut cleanup = MockCleanup::new();
    cleanup.expect_provider().return_const("mock");
    cleanup.expect_is_configured().return_const(true);
    cleanup
        .expect_remove()
        .times(1)
        .returning(move |_, mask, mode| {
            *recorder.lock().unwrap() = Some((mask.to_vec(), mode));
            VendorOutcome::Live(png_bytes(10, 10))
        });

    let app = TestApp::mocked(unused_detector(), cleanup).await;
    let file_id = app.upload_png(10, 10).await;

    let response = app
        .post_json(
            "/remove-people",
            json!({
                "file_id": file_id,
                "selected_people": [1, 1],
                "people_data": people_data(),
                "quality_mode": "quality"
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["removed_people"], json!([1]));
    assert!(json["fallback"].is_null());
    assert!(json["result_image"]
        .as_str()
        .unwrap()
        .starts_with("data:image/png;base64,"));
    assert!(!json["result_id"].as_str().unwrap().is_empty());

    let (mask, mode) = seen.lock().unwrap().take().unwrap();
    assert_eq!(mode, QualityMode::Quality);
    let mask = image::load_from_memory(&mask).unwrap().to_rgb8();
    assert_eq!(mask.dimensions(), (10, 10));
    assert_eq!(mask.get_pixel(4, 4), &Rgb([255, 255, 255]));
    assert_eq!(mask.get_pixel(5, 5), &Rgb([0, 0, 0]));
    // detection 2 was not selected
    assert_eq!(mask.get_pixel(7, 7), &Rgb([0, 0, 0]));

    assert_eq!(app.scratch_entries(), 0);
}

#[tokio::test]
async fn test_vendor_failure_returns_original_and_cleans_scratch() {
    let original = png_bytes(10, 10);

    let mut cleanup = MockCleanup::new();
    cleanup.expect_provider().return_const("mock");
    cleanup.expect_is_configured().return_const(true);
    cleanup.expect_remove().times(1).returning(|image, _, _| {
        VendorOutcome::Fallback {
            value: image.to_vec(),
            reason: FallbackReason::Failed(VendorError::Status {
                vendor: "mock",
                status: 500,
            }),
        }
    });

    let app = TestApp::mocked(unused_detector(), cleanup).await;
    let file_id = app.upload_png(10, 10).await;

    let json = json_body(
        app.post_json(
            "/remove-people",
            json!({ "file_id": file_id, "selected_people": [2], "people_data": people_data() }),
        )
        .await,
    )
    .await;

    assert_eq!(json["success"], true);
    assert_eq!(json["fallback"]["reason"], "vendor_error");
    assert_eq!(json["fallback"]["by_design"], false);

    let result_id = json["result_id"].as_str().unwrap();
    let download = app
        .send(
            axum::http::Request::builder()
                .uri(format!("/download/{}", result_id))
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(body_bytes(download).await, original);
    assert_eq!(app.scratch_entries(), 0);
}

#[tokio::test]
async fn test_demo_mode_round_trip() {
    let app = TestApp::demo().await;
    let file_id = app.upload_png(12, 12).await;

    let detected = json_body(
        app.post_json("/detect-people", json!({ "file_id": file_id }))
            .await,
    )
    .await;

    let json = json_body(
        app.post_json(
            "/remove-people",
            json!({
                "file_id": file_id,
                "selected_people": [1, 3],
                "people_data": detected["people"],
                "quality_mode": "high"
            }),
        )
        .await,
    )
    .await;

    assert_eq!(json["removed_people"], json!([1, 3]));
    assert_eq!(json["fallback"]["reason"], "demo_mode");
}

#[tokio::test]
async fn test_null_selection_is_400_error_response() {
    let app = TestApp::mocked(unused_detector(), unused_cleanup()).await;
    let file_id = app.upload_png(10, 10).await;

    let response = app
        .post_json(
            "/remove-people",
            json!({ "file_id": file_id, "selected_people": null, "people_data": people_data() }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["error_type"], "validation_error");
    assert_eq!(json["details"]["field"], "selected_people");
    assert_eq!(app.scratch_entries(), 0);
}

#[tokio::test]
async fn test_malformed_body_is_400_error_response() {
    let app = TestApp::mocked(unused_detector(), unused_cleanup()).await;

    let wrong_type = app
        .post_json(
            "/remove-people",
            json!({ "file_id": 42, "selected_people": [1], "people_data": people_data() }),
        )
        .await;
    assert_eq!(wrong_type.status(), StatusCode::BAD_REQUEST);
    let json = json_body(wrong_type).await;
    assert_eq!(json["error_type"], "invalid_request");
    assert!(!json["message"].as_str().unwrap().is_empty());

    let not_json = app
        .send(
            axum::http::Request::builder()
                .method(axum::http::Method::POST)
                .uri("/remove-people")
                .header("content-type", "application/json")
                .body(axum::body::Body::from("{\"file_id\": "))
                .unwrap(),
        )
        .await;
    assert_eq!(not_json.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(not_json).await["error_type"], "invalid_request");

    let no_content_type = app
        .send(
            axum::http::Request::builder()
                .method(axum::http::Method::POST)
                .uri("/remove-people")
                .body(axum::body::Body::from(r#"{"file_id": "abc"}"#))
                .unwrap(),
        )
        .await;
    assert_eq!(no_content_type.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(no_content_type).await["error_type"], "invalid_request");
}
