// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod cli;
pub mod config;
pub mod pipeline;
pub mod storage;
pub mod vendors;
pub mod version;
pub mod vision;

// Re-export main types
pub use api::{create_app, AppState};
pub use config::{ServiceConfig, VendorMode};
pub use pipeline::{RemovalOutcome, RemovalRequest};
pub use storage::ImageStore;
pub use vendors::{FallbackReason, Inpainter, MaskGenerator, PersonDetector, Vendors};
pub use vision::Detection;
