// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Service status response types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorStatus {
    pub provider: String,
    /// Whether a usable credential is present
    pub configured: bool,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    /// "live" or "demo"
    pub mode: String,
    pub features: Vec<String>,
    /// Keyed by capability: detection, cleanup, auto_mask
    pub ai_services: BTreeMap<String, VendorStatus>,
    /// Route -> description
    pub endpoints: BTreeMap<String, String>,
}
