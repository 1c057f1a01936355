// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! People removal flow: stored original + selection -> mask -> cleanup -> stored result

use std::collections::BTreeSet;
use std::collections::HashSet;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::storage::{ImageKind, ImageStore, StorageError, StoredImageMeta};
use crate::vendors::{FallbackReason, Inpainter, QualityMode};
use crate::vision::{
    detect_format, encode_png, image_dimensions, synthesize_with, Detection, ImageError,
    ImageInfo, MaskError, MaskOptions,
};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no people selected for removal")]
    EmptySelection,

    #[error("none of the selected ids {0:?} appear in people_data")]
    NoMatchingSelection(Vec<u32>),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("stored original is unreadable: {0}")]
    Image(#[from] ImageError),

    #[error(transparent)]
    Mask(#[from] MaskError),

    #[error("failed to write scratch mask: {0}")]
    Scratch(#[source] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct RemovalRequest {
    pub file_id: String,
    pub selected_ids: Vec<u32>,
    pub people: Vec<Detection>,
    pub quality: QualityMode,
}

#[derive(Debug)]
pub struct RemovalOutcome {
    pub result: StoredImageMeta,
    pub bytes: Vec<u8>,
    /// Selected ids that matched a detection, ascending
    pub removed_ids: Vec<u32>,
    pub fallback: Option<FallbackReason>,
}

/// Selected ids that name one of `people`; duplicates collapse
fn matching_selection(selected: &[u32], people: &[Detection]) -> BTreeSet<u32> {
    let known: HashSet<u32> = people.iter().map(|p| p.id).collect();
    selected
        .iter()
        .copied()
        .filter(|id| known.contains(id))
        .collect()
}

pub async fn remove_people(
    store: &ImageStore,
    inpainter: &dyn Inpainter,
    mask_options: MaskOptions,
    request: RemovalRequest,
) -> Result<RemovalOutcome, PipelineError> {
    if request.selected_ids.is_empty() {
        return Err(PipelineError::EmptySelection);
    }
    let selection = matching_selection(&request.selected_ids, &request.people);
    if selection.is_empty() {
        return Err(PipelineError::NoMatchingSelection(request.selected_ids));
    }
    if selection.len() < request.selected_ids.len() {
        debug!(
            "remove_people {}: ignoring ids not in people_data",
            request.file_id
        );
    }

    let original = store.load(ImageKind::Original, &request.file_id).await?;
    let (width, height) = image_dimensions(&original.bytes)?;

    let selected: HashSet<u32> = selection.iter().copied().collect();
    let mask = synthesize_with(width, height, &request.people, &selected, mask_options)?;
    let mask_png = encode_png(&mask)?;

    // Removed when `mask_file` drops, whichever way this function exits
    let mask_file = store
        .scratch_file("mask-", ".png")
        .map_err(|e| match e {
            StorageError::Io(io) => PipelineError::Scratch(io),
            other => PipelineError::Storage(other),
        })?;
    tokio::fs::write(mask_file.path(), &mask_png)
        .await
        .map_err(PipelineError::Scratch)?;
    debug!(
        "remove_people {}: mask written to {:?}",
        request.file_id,
        mask_file.path()
    );

    info!(
        "remove_people {}: erasing {} of {} people via {} ({})",
        request.file_id,
        selection.len(),
        request.people.len(),
        inpainter.provider(),
        request.quality.as_str()
    );

    let (cleaned, fallback) = inpainter
        .remove(&original.bytes, &mask_png, request.quality)
        .await
        .into_parts();
    drop(mask_file);

    if let Some(reason) = &fallback {
        if reason.is_by_design() {
            debug!("remove_people {}: fallback ({})", request.file_id, reason);
        } else {
            warn!("remove_people {}: vendor failed: {}", request.file_id, reason);
        }
    }

    let format = detect_format(&cleaned).unwrap_or(original.meta.format);
    let (result_width, result_height) = image_dimensions(&cleaned).unwrap_or((width, height));
    let info = ImageInfo {
        width: result_width,
        height: result_height,
        format,
        size_bytes: cleaned.len(),
    };
    let result = store.save(ImageKind::Result, &cleaned, &info).await?;

    Ok(RemovalOutcome {
        result,
        bytes: cleaned,
        removed_ids: selection.into_iter().collect(),
        fallback,
    })
}
