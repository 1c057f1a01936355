// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! People removal endpoint handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::{info, warn};

use super::request::RemovePeopleRequest;
use super::response::RemovePeopleResponse;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::api::FallbackInfo;
use crate::pipeline;
use crate::vision::to_data_uri;

/// POST /remove-people - Erase the selected people from an upload
///
/// Pipeline:
/// 1. Validate request (400 before any vendor call)
/// 2. Load the original (404 if unknown or expired)
/// 3. Synthesize the mask into a scratch file
/// 4. Call the cleanup vendor, falling back to the original
/// 5. Store the result and return it inline
pub async fn remove_people_handler(
    State(state): State<AppState>,
    payload: Result<Json<RemovePeopleRequest>, JsonRejection>,
) -> Result<Json<RemovePeopleResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| {
        warn!("Removal request body rejected: {}", e.body_text());
        ApiError::from(e)
    })?;
    let removal = request.validate().map_err(|e| {
        warn!("Removal request rejected: {}", e);
        e
    })?;
    let file_id = removal.file_id.clone();

    let outcome = pipeline::remove_people(
        &state.store,
        state.vendors.inpainter.as_ref(),
        state.config.mask,
        removal,
    )
    .await
    .map_err(|e| {
        warn!("remove_people {} failed: {}", file_id, e);
        ApiError::from(e)
    })?;

    info!(
        "remove_people {}: stored result {} ({} removed)",
        file_id,
        outcome.result.id,
        outcome.removed_ids.len()
    );

    let message = match &outcome.fallback {
        None => format!("Removed {} people", outcome.removed_ids.len()),
        Some(reason) => format!("Cleanup unavailable ({}), original returned", reason),
    };

    Ok(Json(RemovePeopleResponse {
        success: true,
        result_id: outcome.result.id.to_string(),
        result_image: to_data_uri(&outcome.bytes, outcome.result.format),
        removed_people: outcome.removed_ids,
        fallback: outcome.fallback.as_ref().map(FallbackInfo::from),
        message,
    }))
}
