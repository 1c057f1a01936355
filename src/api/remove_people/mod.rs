// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! People removal API endpoint module
//!
//! Provides POST /remove-people for erasing selected detections.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::remove_people_handler;
pub use request::RemovePeopleRequest;
pub use response::RemovePeopleResponse;
