// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Person detection API endpoint module
//!
//! Provides POST /detect-people for locating people in an uploaded photo.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::detect_people_handler;
pub use request::DetectPeopleRequest;
pub use response::DetectPeopleResponse;
