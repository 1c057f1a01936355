// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Person detection response types

use serde::{Deserialize, Serialize};

use crate::api::FallbackInfo;
use crate::vision::Detection;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectPeopleResponse {
    pub success: bool,
    pub people: Vec<Detection>,
    pub count: usize,
    /// Present when the detector answered with its fixed fallback list
    pub fallback: Option<FallbackInfo>,
    pub message: String,
}
