// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Multipart upload parsing

use axum::http::StatusCode;
use axum_extra::extract::Multipart;

use crate::api::errors::ApiError;

/// Name of the multipart field carrying the photo
pub const IMAGE_FIELD: &str = "image";

/// The `image` part of an upload form
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: Option<String>,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedImage {
    /// Pull the `image` field out of the form, ignoring any other fields
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            if field.name() != Some(IMAGE_FIELD) {
                continue;
            }

            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().unwrap_or_default().to_string();
            let bytes = field.bytes().await.map_err(multipart_error)?;

            return Ok(Self {
                file_name,
                content_type,
                bytes: bytes.to_vec(),
            });
        }

        Err(ApiError::validation(
            IMAGE_FIELD,
            "no image file provided (expected multipart field 'image')",
        ))
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        if self.file_name.as_deref() == Some("") {
            return Err(ApiError::validation(IMAGE_FIELD, "no file selected"));
        }
        if !self.content_type.starts_with("image/") {
            return Err(ApiError::validation(
                IMAGE_FIELD,
                format!(
                    "file must be an image, got content type '{}'",
                    self.content_type
                ),
            ));
        }
        if self.bytes.is_empty() {
            return Err(ApiError::validation(IMAGE_FIELD, "image file is empty"));
        }
        Ok(())
    }
}

fn multipart_error(e: axum_extra::extract::multipart::MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(e.body_text())
    } else {
        ApiError::InvalidRequest(format!("malformed multipart body: {}", e.body_text()))
    }
}
