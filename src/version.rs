// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the Exerase API

/// Service name reported by /status
pub const SERVICE_NAME: &str = "Exerase API";

/// Semantic version number
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "person-detection",
    "people-removal",
    "auto-mask",
    "demo-mode",
    "storage-expiry",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("{} {}", SERVICE_NAME, VERSION)
}
