//! Per-region comparison canvases.
//!
//! [`DiffCanvases`] is lazy: each call to `next` composes exactly one canvas, and dropping the
//! iterator early does no further work. All scratch buffers are locals of the step that uses
//! them, so they are released on every exit path.

use image::RgbImage;

use crate::diff::settings::DiffSettings;
use crate::foundation::core::{PixelRect, Rect};
use crate::foundation::error::{PagediffError, PagediffResult};
use crate::layout::canvas::CanvasLayout;
use crate::layout::frame::Frame;
use crate::raster::ops;

/// One rendered comparison.
#[derive(Clone, Debug)]
pub struct DiffCanvas {
    /// 1-based position in the region order.
    pub index: usize,
    /// Merged region in source pixel coordinates.
    pub region: Rect,
    /// Thumbnail + marker + annotated before/after crops.
    pub image: RgbImage,
}

/// Lazy, single-pass sequence of [`DiffCanvas`] values, one per merged region.
///
/// After the first error the sequence ends.
pub struct DiffCanvases<'a> {
    before: &'a RgbImage,
    after: &'a RgbImage,
    settings: &'a DiffSettings,
    regions: std::vec::IntoIter<Rect>,
    thumbnail: Option<RgbImage>,
    next_index: usize,
    failed: bool,
}

impl<'a> DiffCanvases<'a> {
    /// Prepare canvases for `regions`. The shared thumbnail is built here, once, and only if
    /// there is at least one region.
    pub fn new(
        before: &'a RgbImage,
        after: &'a RgbImage,
        regions: Vec<Rect>,
        settings: &'a DiffSettings,
    ) -> PagediffResult<Self> {
        ops::ensure_same_dimensions(before, after)?;
        let thumbnail = if regions.is_empty() {
            None
        } else {
            Some(build_thumbnail(after, settings)?)
        };
        Ok(Self {
            before,
            after,
            settings,
            regions: regions.into_iter(),
            thumbnail,
            next_index: 1,
            failed: false,
        })
    }

    /// Regions not yet composed, in output order.
    pub fn remaining_regions(&self) -> &[Rect] {
        self.regions.as_slice()
    }
}

impl Iterator for DiffCanvases<'_> {
    type Item = PagediffResult<DiffCanvas>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let region = self.regions.next()?;
        let thumbnail = self.thumbnail.as_ref()?;
        let index = self.next_index;
        self.next_index += 1;

        match compose_region(self.before, self.after, thumbnail, region, self.settings) {
            Ok(image) => Some(Ok(DiffCanvas {
                index,
                region,
                image,
            })),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            return (0, Some(0));
        }
        (0, Some(self.regions.len()))
    }
}

/// Whole-image thumbnail of `after`, `thumbnail_width` wide, with a solid highlight border.
pub fn build_thumbnail(after: &RgbImage, settings: &DiffSettings) -> PagediffResult<RgbImage> {
    let mut frame = Frame::for_image(after.width(), after.height(), None);
    frame.constrain_width(settings.thumbnail_width)?;
    let size = PixelRect::from_rect(frame.relative_bounds()).at_least_one_pixel();

    let small = ops::resize(after, size.width, size.height);
    ops::pad_border(&small, settings.thumbnail_border, settings.highlight_color)
}

#[tracing::instrument(skip(before, after, thumbnail, settings))]
fn compose_region(
    before: &RgbImage,
    after: &RgbImage,
    thumbnail: &RgbImage,
    region: Rect,
    settings: &DiffSettings,
) -> PagediffResult<RgbImage> {
    let layout = CanvasLayout::for_region(
        region,
        before.dimensions(),
        thumbnail.dimensions(),
        settings,
    )?;
    let source = PixelRect::from_rect(region)
        .clip_to(before.width(), before.height())
        .ok_or_else(|| {
            PagediffError::validation(format!(
                "region {region:?} lies outside the {}x{} source",
                before.width(),
                before.height()
            ))
        })?;

    let mut canvas = RgbImage::from_pixel(
        layout.canvas.width,
        layout.canvas.height,
        settings.background.into(),
    );
    ops::copy_into(&mut canvas, thumbnail, layout.thumbnail);
    ops::fill_rect(&mut canvas, layout.marker, settings.highlight_color);

    for (image, slot) in [(before, layout.before), (after, layout.after)] {
        let crop = ops::resize(&ops::crop(image, source), slot.width, slot.height);
        ops::copy_into(&mut canvas, &crop, slot);
    }

    let mut before_view = ops::crop(&canvas, layout.before);
    let mut after_view = ops::crop(&canvas, layout.after);
    ops::overlay_changes(
        &mut before_view,
        &mut after_view,
        settings.overlay_threshold,
        settings.overlay_source_weight,
        settings.overlay_mask_weight,
    )?;

    for (view, slot) in [(&mut before_view, layout.before), (&mut after_view, layout.after)] {
        ops::draw_grid(
            view,
            settings.grid_cell_size,
            settings.grid_thickness,
            settings.grid_color,
        );
        ops::copy_into(&mut canvas, view, slot);
        ops::draw_border(&mut canvas, slot, settings.grid_thickness, settings.grid_color);
    }

    Ok(canvas)
}

#[cfg(test)]
#[path = "../../tests/unit/diff/composer.rs"]
mod tests;
