// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Upload endpoint handler

use axum::{extract::State, Json};
use axum_extra::extract::Multipart;
use tracing::{debug, info, warn};

use super::request::UploadedImage;
use super::response::UploadResponse;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::storage::ImageKind;
use crate::vision::{decode_image_bytes, to_data_uri};

/// POST /upload - Store an original photo
///
/// Accepts a multipart form with an `image` field whose content type starts
/// with `image/`. The bytes must decode as a supported format and fit the
/// configured size limit.
pub async fn upload_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let upload = UploadedImage::from_multipart(multipart).await?;
    debug!(
        "Upload received: name={:?}, content_type={}, {} bytes",
        upload.file_name,
        upload.content_type,
        upload.bytes.len()
    );

    if let Err(e) = upload.validate() {
        warn!("Upload rejected: {}", e);
        return Err(e);
    }

    let (_, info) = decode_image_bytes(&upload.bytes, state.config.max_upload_bytes)
        .map_err(|e| {
            warn!("Upload rejected: {}", e);
            ApiError::from(e)
        })?;

    let meta = state
        .store
        .save(ImageKind::Original, &upload.bytes, &info)
        .await?;

    info!(
        "Stored upload {} ({}x{} {})",
        meta.id,
        meta.width,
        meta.height,
        meta.format.extension()
    );

    Ok(Json(UploadResponse {
        success: true,
        file_id: meta.id.to_string(),
        image_data: to_data_uri(&upload.bytes, meta.format),
        width: meta.width,
        height: meta.height,
        format: meta.format,
        message: "Image uploaded successfully".to_string(),
    }))
}
