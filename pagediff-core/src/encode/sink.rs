use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::diff::composer::DiffCanvas;
use crate::foundation::error::PagediffResult;

/// Consumer of rendered canvases.
///
/// Ordering contract: `push_canvas` is called in increasing `DiffCanvas::index` order.
pub trait CanvasSink {
    /// Called once before any canvas is pushed, with the number of regions found.
    fn begin(&mut self, regions: usize) -> PagediffResult<()>;
    /// Push one canvas.
    fn push_canvas(&mut self, canvas: &DiffCanvas) -> PagediffResult<()>;
    /// Called once after the last canvas is pushed.
    fn end(&mut self) -> PagediffResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    regions: Option<usize>,
    pub(crate) canvases: Vec<DiffCanvas>,
    finished: bool,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Region count reported in `begin`, if it was called.
    pub fn regions(&self) -> Option<usize> {
        self.regions
    }

    /// Canvases pushed since the last `begin`.
    pub fn canvases(&self) -> &[DiffCanvas] {
        &self.canvases
    }

    /// Whether `end` was reached.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl CanvasSink for InMemorySink {
    fn begin(&mut self, regions: usize) -> PagediffResult<()> {
        self.regions = Some(regions);
        self.canvases.clear();
        self.finished = false;
        Ok(())
    }

    fn push_canvas(&mut self, canvas: &DiffCanvas) -> PagediffResult<()> {
        self.canvases.push(canvas.clone());
        Ok(())
    }

    fn end(&mut self) -> PagediffResult<()> {
        self.finished = true;
        Ok(())
    }
}

/// Writes each canvas to `{prefix}{index}.png`.
///
/// Paths written so far are tracked so a failed run can [`discard`](Self::discard) them.
#[derive(Debug)]
pub struct PngSequenceSink {
    prefix: PathBuf,
    written: Vec<PathBuf>,
}

impl PngSequenceSink {
    /// Sink writing next to `prefix`, which may contain directories.
    pub fn new(prefix: impl Into<PathBuf>) -> Self {
        Self {
            prefix: prefix.into(),
            written: Vec::new(),
        }
    }

    /// Output path for the 1-based `index`.
    pub fn path_for(&self, index: usize) -> PathBuf {
        let mut name = self.prefix.clone().into_os_string();
        name.push(format!("{index}.png"));
        PathBuf::from(name)
    }

    /// Files written by this sink, in order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Remove every file this sink wrote. Removal failures are logged, not returned.
    pub fn discard(&mut self) {
        for path in self.written.drain(..) {
            if let Err(e) = std::fs::remove_file(&path) {
                tracing::warn!(path = %path.display(), error = %e, "could not remove partial output");
            }
        }
    }
}

impl CanvasSink for PngSequenceSink {
    fn begin(&mut self, regions: usize) -> PagediffResult<()> {
        tracing::debug!(regions, prefix = %self.prefix.display(), "writing png sequence");
        self.written.clear();
        Ok(())
    }

    fn push_canvas(&mut self, canvas: &DiffCanvas) -> PagediffResult<()> {
        let path = self.path_for(canvas.index);
        ensure_parent_dir(&path)?;
        canvas
            .image
            .save_with_format(&path, image::ImageFormat::Png)
            .with_context(|| format!("write png '{}'", path.display()))?;
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> PagediffResult<()> {
        Ok(())
    }
}

fn ensure_parent_dir(path: &Path) -> PagediffResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
