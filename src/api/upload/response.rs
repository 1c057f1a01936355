// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Upload response types

use serde::{Deserialize, Serialize};

use crate::vision::SupportedFormat;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    /// Id to pass to /detect-people and /remove-people
    pub file_id: String,
    /// The stored image as a data URI for previewing
    pub image_data: String,
    pub width: u32,
    pub height: u32,
    pub format: SupportedFormat,
    pub message: String,
}
