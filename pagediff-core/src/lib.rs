//! pagediff locates the regions where two same-sized images differ and renders one annotated
//! comparison canvas per region.
//!
//! # Pipeline overview
//!
//! 1. **Detect**: `before + after -> Vec<Rect>` (threshold, dilate, external contours)
//! 2. **Cluster**: merge fragments that lie within `near_size` of each other, sort by top edge
//! 3. **Compose**: lazily render each region into a canvas (thumbnail, marker, before/after
//!    crops with change overlay and grid)
//! 4. **Emit** (optional): stream canvases into a [`CanvasSink`], e.g. [`PngSequenceSink`]
//!
//! Layout math goes through [`Frame`], a hierarchical scale + translate coordinate frame.
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod cluster;
mod diff;
mod encode;
mod foundation;
mod layout;
mod raster;

pub use crate::cluster::merge::{ClusterStrategy, cluster_regions};
pub use crate::diff::composer::{DiffCanvas, DiffCanvases, build_thumbnail};
pub use crate::diff::detector::{detect_fragments, detect_regions};
pub use crate::diff::pipeline::{DiffStats, Differ};
pub use crate::diff::settings::{DiffSettings, MAX_STROKE};
pub use crate::encode::sink::{CanvasSink, InMemorySink, PngSequenceSink};
pub use crate::foundation::core::{PIXEL_SNAP, PixelRect, Point, Rect, Rgb8, Size, Vec2};
pub use crate::foundation::error::{PagediffError, PagediffResult};
pub use crate::foundation::math::{intersects, min_size, near, union};
pub use crate::layout::canvas::CanvasLayout;
pub use crate::layout::frame::Frame;
pub use crate::raster::decode::{decode_image, open_image};

/// Decoded 8-bit RGB image used for every input and output buffer.
pub use image::RgbImage;
