use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::cluster::merge::ClusterStrategy;
use crate::foundation::core::{Rgb8, Size};
use crate::foundation::error::{PagediffError, PagediffResult};

/// Largest accepted border or grid line thickness, in pixels.
pub const MAX_STROKE: u32 = 64;

/// Tunables for change detection, clustering and canvas composition.
///
/// Every field has a default (see [`DiffSettings::default`]), so a JSON document only needs to
/// name the values it overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DiffSettings {
    /// Per-channel intensity difference at or above which a pixel counts as changed.
    pub threshold: f64,
    /// Side length of the all-ones square used to dilate the change mask.
    pub structuring_element: u32,
    /// Margin (per axis) within which two change fragments are merged.
    pub near_size: Size,
    /// Single fold (reference behavior) or repeat-until-stable merging.
    pub cluster_strategy: ClusterStrategy,
    /// Width of the whole-image locator thumbnail, before its border.
    pub thumbnail_width: f64,
    /// Solid border thickness around the thumbnail, in pixels.
    pub thumbnail_border: u32,
    /// Width at which each before/after crop is displayed.
    pub image_width: f64,
    /// Gap between the thumbnail and the crops, and between the two crops.
    pub image_spacing: Size,
    /// Smallest marker painted on the thumbnail.
    pub min_marker_size: Size,
    /// Alignment grid cell size.
    pub grid_cell_size: Size,
    /// Line and border thickness of the alignment grid.
    pub grid_thickness: u32,
    /// Alignment grid color.
    pub grid_color: Rgb8,
    /// Thumbnail border and locator marker color.
    pub highlight_color: Rgb8,
    /// Canvas fill behind the thumbnail and crops.
    pub background: Rgb8,
    /// Threshold used when re-diffing the rendered crops.
    pub overlay_threshold: f64,
    /// Weight of the crop pixels in the change overlay blend.
    pub overlay_source_weight: f64,
    /// Weight of the change mask in the change overlay blend.
    pub overlay_mask_weight: f64,
}

impl Default for DiffSettings {
    fn default() -> Self {
        Self {
            threshold: 5.0,
            structuring_element: 8,
            near_size: Size::new(40.0, 200.0),
            cluster_strategy: ClusterStrategy::SinglePass,
            thumbnail_width: 150.0,
            thumbnail_border: 2,
            image_width: 600.0,
            image_spacing: Size::new(20.0, 20.0),
            min_marker_size: Size::new(20.0, 20.0),
            grid_cell_size: Size::new(20.0, 20.0),
            grid_thickness: 1,
            grid_color: Rgb8::GRAY,
            highlight_color: Rgb8::RED,
            background: Rgb8::WHITE,
            overlay_threshold: 1.0,
            overlay_source_weight: 0.9,
            overlay_mask_weight: 0.2,
        }
    }
}

impl DiffSettings {
    /// Parse settings from a JSON reader. Missing fields take their defaults.
    pub fn from_reader<R: std::io::Read>(r: R) -> PagediffResult<Self> {
        let settings: Self = serde_json::from_reader(r)
            .map_err(|e| PagediffError::validation(format!("parse settings JSON: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parse settings from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> PagediffResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            PagediffError::validation(format!("open settings JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Reject values that would make detection or layout degenerate.
    pub fn validate(&self) -> PagediffResult<()> {
        for (name, value) in [
            ("threshold", self.threshold),
            ("overlay_threshold", self.overlay_threshold),
            ("thumbnail_width", self.thumbnail_width),
            ("image_width", self.image_width),
            ("grid_cell_size.width", self.grid_cell_size.width),
            ("grid_cell_size.height", self.grid_cell_size.height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(PagediffError::validation(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        for (name, value) in [
            ("near_size.width", self.near_size.width),
            ("near_size.height", self.near_size.height),
            ("image_spacing.width", self.image_spacing.width),
            ("image_spacing.height", self.image_spacing.height),
            ("min_marker_size.width", self.min_marker_size.width),
            ("min_marker_size.height", self.min_marker_size.height),
            ("overlay_source_weight", self.overlay_source_weight),
            ("overlay_mask_weight", self.overlay_mask_weight),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PagediffError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        if !(1..=255).contains(&self.structuring_element) {
            return Err(PagediffError::validation(
                "structuring_element must be in 1..=255",
            ));
        }
        if !(1..=MAX_STROKE).contains(&self.grid_thickness) {
            return Err(PagediffError::validation(format!(
                "grid_thickness must be in 1..={MAX_STROKE}"
            )));
        }
        if self.thumbnail_border > MAX_STROKE {
            return Err(PagediffError::validation(format!(
                "thumbnail_border must be <= {MAX_STROKE}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/diff/settings.rs"]
mod tests;
