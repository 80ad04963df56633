use image::RgbImage;

use crate::cluster::merge::cluster_regions;
use crate::diff::settings::DiffSettings;
use crate::foundation::core::Rect;
use crate::foundation::error::PagediffResult;
use crate::raster::ops;

/// Raw change fragments: bounding boxes of the dilated change mask's outer contours.
///
/// Every intermediate mask is dropped before this returns.
pub fn detect_fragments(
    before: &RgbImage,
    after: &RgbImage,
    settings: &DiffSettings,
) -> PagediffResult<Vec<Rect>> {
    let dilated = {
        let binary = ops::binary_threshold(
            &ops::absolute_difference(before, after)?,
            settings.threshold,
        );
        ops::dilate(&ops::to_gray(&binary), settings.structuring_element)?
    };
    Ok(ops::external_contour_rects(&dilated))
}

/// Merged regions of interest, sorted by top edge. Empty when the images match within
/// `settings.threshold`.
#[tracing::instrument(skip_all, fields(width = before.width(), height = before.height()))]
pub fn detect_regions(
    before: &RgbImage,
    after: &RgbImage,
    settings: &DiffSettings,
) -> PagediffResult<Vec<Rect>> {
    let raw = detect_fragments(before, after, settings)?;
    tracing::trace!(fragments = raw.len(), "extracted change fragments");

    let merged = cluster_regions(&raw, settings.near_size, settings.cluster_strategy);
    if merged.is_empty() {
        tracing::debug!("no differences above threshold");
    } else {
        tracing::debug!(regions = merged.len(), "merged change regions");
    }
    Ok(merged)
}

#[cfg(test)]
#[path = "../../tests/unit/diff/detector.rs"]
mod tests;
