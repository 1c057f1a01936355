// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod detect_people;
pub mod download;
pub mod errors;
pub mod http_server;
pub mod remove_people;
pub mod status;
pub mod upload;

use serde::{Deserialize, Serialize};

use crate::vendors::FallbackReason;

pub use errors::{ApiError, ErrorResponse};
pub use http_server::{create_app, start_server, AppState};

/// Why a response carries fallback data instead of a vendor answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackInfo {
    /// missing_credential, demo_mode or vendor_error
    pub reason: String,
    /// False when a configured vendor call failed
    pub by_design: bool,
    pub detail: String,
}

impl From<&FallbackReason> for FallbackInfo {
    fn from(reason: &FallbackReason) -> Self {
        Self {
            reason: reason.code().to_string(),
            by_design: reason.is_by_design(),
            detail: reason.to_string(),
        }
    }
}
