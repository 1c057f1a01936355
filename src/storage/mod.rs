// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod image_store;

// Re-export main types for convenience
pub use image_store::{
    ImageKind, ImageStore, StorageError, StoredImage, StoredImageMeta, SweepStats,
};
