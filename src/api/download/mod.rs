// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Result download endpoint module
//!
//! Provides GET /download/{result_id}.

pub mod handler;

pub use handler::{attachment_name, download_handler};
