//! Hierarchical scale + translate coordinate frames.
//!
//! A [`Frame`] is a rectangle expressed in its parent's local units plus a uniform scale.
//! Resolving a frame ("relative" geometry) walks the parent chain and composes scale
//! multiplicatively and origin additively. Nothing is cached: every getter recomputes from the
//! chain, so a frame always reflects its ancestors' current state.
//!
//! Parents are borrowed, never owned. Frames form a forest and the borrow checker keeps every
//! parent alive (and unmodified) for as long as a child refers to it.

use std::fmt;

use crate::foundation::core::{Point, Rect, Size};
use crate::foundation::error::{PagediffError, PagediffResult};

/// One node of a coordinate frame tree.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame<'p> {
    bounds: Rect,
    scale: f64,
    parent: Option<&'p Frame<'p>>,
}

impl<'p> Frame<'p> {
    /// Frame with the given local bounds and a scale of 1.
    pub fn new(bounds: Rect, parent: Option<&'p Frame<'p>>) -> Self {
        Self {
            bounds,
            scale: 1.0,
            parent,
        }
    }

    /// Frame of the given size anchored at the local origin.
    pub fn with_size(size: Size, parent: Option<&'p Frame<'p>>) -> Self {
        Self::new(Rect::from_origin_size(Point::ORIGIN, size), parent)
    }

    /// Frame matching the dimensions of a `width` x `height` pixel buffer.
    pub fn for_image(width: u32, height: u32, parent: Option<&'p Frame<'p>>) -> Self {
        Self::with_size(Size::new(f64::from(width), f64::from(height)), parent)
    }

    /// Snapshot `source`'s resolved bounds as the local bounds of a new frame.
    ///
    /// The new frame is parented to `parent` when given, otherwise to `source`'s own parent.
    /// The copy is not linked to `source`: later changes to `source` or its ancestors do not
    /// move it.
    pub fn flatten<'s: 'p>(source: &Frame<'s>, parent: Option<&'p Frame<'p>>) -> Self {
        Self::new(source.relative_bounds(), parent.or(source.parent))
    }

    /// Child frame whose local bounds are `rect`, in this frame's units.
    pub fn at(&self, rect: Rect) -> Frame<'_> {
        Frame::new(rect, Some(self))
    }

    /// Child frame at `origin` with `size`, in this frame's units.
    pub fn at_point(&self, origin: Point, size: Size) -> Frame<'_> {
        self.at(Rect::from_origin_size(origin, size))
    }

    /// Local bounds, in the parent's units.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Own scale, excluding ancestors.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Enclosing frame, if any.
    pub fn parent(&self) -> Option<&'p Frame<'p>> {
        self.parent
    }

    /// Local top-left.
    pub fn origin(&self) -> Point {
        self.bounds.origin()
    }

    /// Local (unscaled) size.
    pub fn size(&self) -> Size {
        self.bounds.size()
    }

    /// Replace the local top-left, keeping the size.
    pub fn set_origin(&mut self, origin: Point) {
        self.bounds = Rect::from_origin_size(origin, self.bounds.size());
    }

    /// Replace the size, keeping the local top-left.
    pub fn set_size(&mut self, size: Size) {
        self.bounds = Rect::from_origin_size(self.bounds.origin(), size);
    }

    /// Set the scale directly. Must be positive and finite.
    pub fn set_scale(&mut self, scale: f64) -> PagediffResult<()> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(PagediffError::degenerate_frame(format!(
                "scale must be finite and > 0, got {scale}"
            )));
        }
        self.scale = scale;
        Ok(())
    }

    /// Scale so the local (unscaled) width maps to `target`.
    ///
    /// Fails with [`PagediffError::DegenerateFrame`] for a zero-width frame; the frame is left
    /// unchanged on error.
    pub fn constrain_width(&mut self, target: f64) -> PagediffResult<()> {
        self.scale = constrain_ratio(target, self.bounds.width(), "width")?;
        Ok(())
    }

    /// Scale so the local (unscaled) height maps to `target`.
    pub fn constrain_height(&mut self, target: f64) -> PagediffResult<()> {
        self.scale = constrain_ratio(target, self.bounds.height(), "height")?;
        Ok(())
    }

    /// Own scale times every ancestor's scale.
    pub fn relative_scale(&self) -> f64 {
        match self.parent {
            Some(parent) => self.scale * parent.relative_scale(),
            None => self.scale,
        }
    }

    /// Parent's resolved origin plus the local origin scaled by [`Self::relative_scale`].
    pub fn relative_origin(&self) -> Point {
        let base = self
            .parent
            .map_or(Point::ORIGIN, |parent| parent.relative_origin());
        base + self.origin().to_vec2() * self.relative_scale()
    }

    /// Local size scaled by [`Self::relative_scale`].
    pub fn relative_size(&self) -> Size {
        self.size() * self.relative_scale()
    }

    /// Resolved bounds in root space.
    pub fn relative_bounds(&self) -> Rect {
        Rect::from_origin_size(self.relative_origin(), self.relative_size())
    }

    /// Resolved width in root space.
    pub fn relative_width(&self) -> f64 {
        self.bounds.width() * self.relative_scale()
    }

    /// Resolved height in root space.
    pub fn relative_height(&self) -> f64 {
        self.bounds.height() * self.relative_scale()
    }

    /// Map a point in this frame's local space into root space.
    pub fn project_point(&self, point: Point) -> Point {
        self.relative_origin() + point.to_vec2() * self.relative_scale()
    }

    /// Map a rectangle in this frame's local space into root space.
    pub fn project_rect(&self, rect: Rect) -> Rect {
        Rect::from_origin_size(
            self.project_point(rect.origin()),
            rect.size() * self.relative_scale(),
        )
    }
}

impl fmt::Display for Frame<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = self.relative_bounds();
        write!(
            f,
            "({}, {}) {}x{} ({:.2})",
            b.x0,
            b.y0,
            b.width(),
            b.height(),
            self.scale
        )
    }
}

fn constrain_ratio(target: f64, local: f64, axis: &str) -> PagediffResult<f64> {
    if !local.is_finite() || local <= 0.0 {
        return Err(PagediffError::degenerate_frame(format!(
            "cannot constrain {axis}: local {axis} is {local}"
        )));
    }
    if !target.is_finite() || target <= 0.0 {
        return Err(PagediffError::degenerate_frame(format!(
            "target {axis} must be finite and > 0, got {target}"
        )));
    }
    Ok(target / local)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/frame.rs"]
mod tests;
