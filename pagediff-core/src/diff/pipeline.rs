use image::RgbImage;

use crate::diff::composer::DiffCanvases;
use crate::diff::detector::detect_regions;
use crate::diff::settings::DiffSettings;
use crate::encode::sink::CanvasSink;
use crate::foundation::core::Rect;
use crate::foundation::error::PagediffResult;

/// Counters reported by [`Differ::run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DiffStats {
    /// Merged regions found.
    pub regions: usize,
    /// Canvases handed to the sink.
    pub canvases_written: usize,
}

/// Entry point: detect differing regions and render one comparison canvas per region.
///
/// Every call recomputes from scratch; nothing is memoized across calls.
#[derive(Clone, Debug, Default)]
pub struct Differ {
    settings: DiffSettings,
}

impl Differ {
    /// Build a differ after validating `settings`.
    pub fn new(settings: DiffSettings) -> PagediffResult<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    /// Settings this differ was built with.
    pub fn settings(&self) -> &DiffSettings {
        &self.settings
    }

    /// Merged regions of interest, sorted by top edge.
    pub fn detect_regions(&self, before: &RgbImage, after: &RgbImage) -> PagediffResult<Vec<Rect>> {
        detect_regions(before, after, &self.settings)
    }

    /// Detect regions eagerly, then return the lazy canvas sequence for them.
    ///
    /// An empty sequence means the images are identical within the threshold.
    pub fn compute_diff<'a>(
        &'a self,
        before: &'a RgbImage,
        after: &'a RgbImage,
    ) -> PagediffResult<DiffCanvases<'a>> {
        let regions = self.detect_regions(before, after)?;
        DiffCanvases::new(before, after, regions, &self.settings)
    }

    /// Stream every canvas into `sink`, in region order.
    ///
    /// Stops at the first composition or sink error; `end` is only called on success.
    #[tracing::instrument(skip_all)]
    pub fn run(
        &self,
        before: &RgbImage,
        after: &RgbImage,
        sink: &mut dyn CanvasSink,
    ) -> PagediffResult<DiffStats> {
        let canvases = self.compute_diff(before, after)?;
        let mut stats = DiffStats {
            regions: canvases.remaining_regions().len(),
            canvases_written: 0,
        };

        sink.begin(stats.regions)?;
        for canvas in canvases {
            sink.push_canvas(&canvas?)?;
            stats.canvases_written += 1;
        }
        sink.end()?;

        tracing::debug!(?stats, "diff run complete");
        Ok(stats)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/diff/pipeline.rs"]
mod tests;
