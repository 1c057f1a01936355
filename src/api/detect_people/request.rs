// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Person detection request types and validation

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectPeopleRequest {
    /// Id returned by /upload
    #[serde(default)]
    pub file_id: Option<String>,
}

impl DetectPeopleRequest {
    /// Return the trimmed file id, or an error message when absent
    pub fn validate(&self) -> Result<&str, String> {
        match self.file_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => Ok(id),
            _ => Err("file_id is required".to_string()),
        }
    }
}
