// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Person detection endpoint handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::{debug, info, warn};

use super::request::DetectPeopleRequest;
use super::response::DetectPeopleResponse;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::api::FallbackInfo;
use crate::storage::ImageKind;

/// POST /detect-people - Locate people in an uploaded photo
///
/// Never fails because of the detection vendor: when it cannot be used the
/// fixed fallback list is returned and `fallback` says why.
pub async fn detect_people_handler(
    State(state): State<AppState>,
    payload: Result<Json<DetectPeopleRequest>, JsonRejection>,
) -> Result<Json<DetectPeopleResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| {
        warn!("Detection request body rejected: {}", e.body_text());
        ApiError::from(e)
    })?;
    let file_id = request.validate().map_err(|e| {
        warn!("Detection request rejected: {}", e);
        ApiError::validation("file_id", e)
    })?;

    let original = state.store.load(ImageKind::Original, file_id).await?;
    debug!(
        "detect_people {}: {} bytes via {}",
        file_id,
        original.bytes.len(),
        state.vendors.detector.provider()
    );

    let (people, fallback) = state
        .vendors
        .detector
        .detect(&original.bytes)
        .await
        .into_parts();

    info!(
        "detect_people {}: {} people{}",
        file_id,
        people.len(),
        fallback
            .as_ref()
            .map(|r| format!(" (fallback: {})", r))
            .unwrap_or_default()
    );

    let count = people.len();
    Ok(Json(DetectPeopleResponse {
        success: true,
        people,
        count,
        fallback: fallback.as_ref().map(FallbackInfo::from),
        message: format!("Detected {} people", count),
    }))
}
