// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! People removal response types

use serde::{Deserialize, Serialize};

use crate::api::FallbackInfo;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemovePeopleResponse {
    pub success: bool,
    /// Id to pass to /download
    pub result_id: String,
    /// The stored result as a data URI
    pub result_image: String,
    /// Ids of the detections erased, ascending
    pub removed_people: Vec<u32>,
    /// Present when the cleanup vendor was skipped or failed and the result
    /// is the unmodified original
    pub fallback: Option<FallbackInfo>,
    pub message: String,
}
