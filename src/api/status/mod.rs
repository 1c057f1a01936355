// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Service status endpoint module
//!
//! Provides GET /status describing configured vendors and routes.

pub mod handler;
pub mod response;

pub use handler::status_handler;
pub use response::{StatusResponse, VendorStatus};
