// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Result download handler

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::storage::{ImageKind, StoredImageMeta};

/// File name offered to the browser for a stored result
pub fn attachment_name(meta: &StoredImageMeta) -> String {
    format!("exerase-result-{}.{}", meta.id, meta.format.extension())
}

/// GET /download/{result_id} - Stream a stored result as an attachment
///
/// Only results are served; ids of originals, unknown, malformed and
/// expired ids are all 404.
pub async fn download_handler(
    State(state): State<AppState>,
    Path(result_id): Path<String>,
) -> Result<Response, ApiError> {
    let result = state.store.load(ImageKind::Result, &result_id).await?;
    debug!(
        "download {}: {} bytes ({})",
        result.meta.id,
        result.bytes.len(),
        result.meta.format.mime_type()
    );

    let disposition = format!("attachment; filename=\"{}\"", attachment_name(&result.meta));
    Ok((
        [
            (header::CONTENT_TYPE, result.meta.format.mime_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        result.bytes,
    )
        .into_response())
}
