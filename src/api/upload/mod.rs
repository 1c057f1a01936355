// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Upload API endpoint module
//!
//! Provides POST /upload for storing an original photo.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::upload_handler;
pub use request::UploadedImage;
pub use response::UploadResponse;
