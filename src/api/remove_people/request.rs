// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! People removal request types and validation

use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::pipeline::RemovalRequest;
use crate::vendors::QualityMode;
use crate::vision::Detection;

/// Request for POST /remove-people
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemovePeopleRequest {
    /// Id returned by /upload
    #[serde(default)]
    pub file_id: Option<String>,

    /// Ids of the detections to erase; `null` counts as empty
    #[serde(default)]
    pub selected_people: Option<Vec<u32>>,

    /// Detections as returned by /detect-people
    #[serde(default)]
    pub people_data: Option<Vec<Detection>>,

    /// "fast" (default) or "quality"
    #[serde(default)]
    pub quality_mode: Option<String>,
}

impl RemovePeopleRequest {
    /// Check the request and turn it into pipeline input.
    ///
    /// Runs before any storage or vendor access.
    pub fn validate(self) -> Result<RemovalRequest, ApiError> {
        let file_id = match self.file_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => return Err(ApiError::validation("file_id", "file_id is required")),
        };

        let selected_ids = self.selected_people.unwrap_or_default();
        if selected_ids.is_empty() {
            return Err(ApiError::validation(
                "selected_people",
                "select at least one person to remove",
            ));
        }

        let quality = match self.quality_mode.as_deref() {
            None | Some("") => QualityMode::default(),
            Some(mode) => mode.parse::<QualityMode>()?,
        };

        Ok(RemovalRequest {
            file_id,
            selected_ids,
            people: self.people_data.unwrap_or_default(),
            quality,
        })
    }
}
