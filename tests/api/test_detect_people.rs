// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! POST /detect-people

use super::support::*;
use axum::http::StatusCode;
use exerase_api::{
    vendors::{FallbackReason, VendorOutcome},
    vision::Detection,
};
use serde_json::json;

#[tokio::test]
async fn test_detect_returns_vendor_people() {
    let mut detector = MockDetector::new();
    detector.expect_provider().return_const("mock");
    detector.expect_is_configured().return_const(true);
    detector.expect_detect().times(1).returning(|_| {
        VendorOutcome::Live(vec![Detection {
            id: 1,
            x: 10.0,
            y: 20.0,
            width: 30.0,
            height: 40.0,
            confidence: 0.7,
        }])
    });

    let app = TestApp::mocked(detector, unused_cleanup()).await;
    let file_id = app.upload_png(20, 20).await;

    let response = app
        .post_json("/detect-people", json!({ "file_id": file_id }))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["people"][0]["width"], 30.0);
    assert!(json["fallback"].is_null());
}

#[tokio::test]
async fn test_detect_demo_mode_returns_fixed_list() {
    let app = TestApp::demo().await;
    let file_id = app.upload_png(20, 20).await;

    let json = json_body(
        app.post_json("/detect-people", json!({ "file_id": file_id }))
            .await,
    )
    .await;

    assert_eq!(json["count"], 3);
    let ids: Vec<u64> = json["people"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(json["people"][1]["confidence"], 0.88);
    assert_eq!(json["fallback"]["reason"], "demo_mode");
    assert_eq!(json["fallback"]["by_design"], true);
}

#[tokio::test]
async fn test_detect_reports_vendor_failure() {
    let mut detector = MockDetector::new();
    detector.expect_provider().return_const("mock");
    detector.expect_is_configured().return_const(true);
    detector.expect_detect().returning(|_| VendorOutcome::Fallback {
        value: exerase_api::vision::fallback_detections(),
        reason: FallbackReason::Failed(exerase_api::vendors::VendorError::Status {
            vendor: "mock",
            status: 503,
        }),
    });

    let app = TestApp::mocked(detector, unused_cleanup()).await;
    let file_id = app.upload_png(8, 8).await;
    let json = json_body(
        app.post_json("/detect-people", json!({ "file_id": file_id }))
            .await,
    )
    .await;

    assert_eq!(json["count"], 3);
    assert_eq!(json["fallback"]["reason"], "vendor_error");
    assert_eq!(json["fallback"]["by_design"], false);
}

#[tokio::test]
async fn test_detect_missing_file_id_is_400() {
    let app = TestApp::mocked(unused_detector(), unused_cleanup()).await;
    let response = app.post_json("/detect-people", json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_detect_unknown_file_is_404() {
    let app = TestApp::mocked(unused_detector(), unused_cleanup()).await;
    let response = app
        .post_json(
            "/detect-people",
            json!({ "file_id": "0b4c8f3e-7a51-4f77-9a4c-2f0f0c1d9e11" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["error_type"], "not_found");
}

#[tokio::test]
async fn test_wrong_typed_file_id_is_400_error_response() {
    let app = TestApp::mocked(unused_detector(), unused_cleanup()).await;
    let response = app
        .post_json("/detect-people", json!({ "file_id": [1, 2] }))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error_type"], "invalid_request");
}
