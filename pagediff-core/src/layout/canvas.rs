use crate::diff::settings::DiffSettings;
use crate::foundation::core::{PixelRect, Point, Rect, Size, Vec2};
use crate::foundation::error::PagediffResult;
use crate::foundation::math::min_size;
use crate::layout::frame::Frame;

/// Resolved pixel geometry of one comparison canvas.
///
/// The thumbnail sits at the top-left; the before/after crops are right-aligned and stacked,
/// separated by the configured spacing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasLayout {
    /// Full canvas extent (origin is always zero).
    pub canvas: PixelRect,
    /// Where the bordered thumbnail is copied.
    pub thumbnail: PixelRect,
    /// Locator marker painted over the thumbnail.
    pub marker: PixelRect,
    /// Slot receiving the resized "before" crop.
    pub before: PixelRect,
    /// Slot receiving the resized "after" crop.
    pub after: PixelRect,
}

impl CanvasLayout {
    /// Lay out the canvas for `region` (source pixel coordinates).
    ///
    /// `source` is the size of the images being compared and `thumbnail` the size of the
    /// already-bordered thumbnail.
    pub fn for_region(
        region: Rect,
        source: (u32, u32),
        thumbnail: (u32, u32),
        settings: &DiffSettings,
    ) -> PagediffResult<Self> {
        let spacing = settings.image_spacing;
        let (thumb_w, thumb_h) = (f64::from(thumbnail.0), f64::from(thumbnail.1));

        let mut display = Frame::with_size(region.size(), None);
        display.constrain_width(settings.image_width)?;

        let canvas_size = Size::new(
            (settings.image_width + spacing.width + thumb_w).ceil(),
            (display.relative_height() * 2.0 + spacing.height * 2.0)
                .max(thumb_h + spacing.height)
                .ceil(),
        );
        let canvas = Frame::with_size(canvas_size, None);

        let mut thumb = Frame::for_image(source.0, source.1, Some(&canvas));
        thumb.constrain_width(thumb_w)?;
        let marker = min_size(thumb.project_rect(region), settings.min_marker_size);

        let mut before = Frame::flatten(&display, Some(&canvas));
        before.set_origin(Point::new(canvas.size().width - settings.image_width, 0.0));

        let mut after = Frame::flatten(&display, Some(&canvas));
        after.set_origin(
            before.origin() + Vec2::new(0.0, before.relative_height() + spacing.height),
        );

        tracing::debug!(%canvas, %thumb, %before, %after, "canvas layout");

        let thumb_origin = PixelRect::from_rect(thumb.relative_bounds());
        Ok(Self {
            canvas: PixelRect::from_rect(canvas.relative_bounds()),
            thumbnail: PixelRect::new(thumb_origin.x, thumb_origin.y, thumbnail.0, thumbnail.1),
            marker: PixelRect::from_rect(marker).at_least_one_pixel(),
            before: PixelRect::from_rect(before.relative_bounds()).at_least_one_pixel(),
            after: PixelRect::from_rect(after.relative_bounds()).at_least_one_pixel(),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/canvas.rs"]
mod tests;
