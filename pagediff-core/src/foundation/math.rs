use crate::foundation::core::{Rect, Size};

/// Strict overlap test: rectangles that only share an edge do not intersect.
pub fn intersects(a: Rect, b: Rect) -> bool {
    a.x0 < b.x1 && b.x0 < a.x1 && a.y0 < b.y1 && b.y0 < a.y1
}

/// True when `a`, inflated by `margin` on every side, intersects `b`.
///
/// Symmetric in `a` and `b` because inflation is applied to both sides of each axis.
pub fn near(a: Rect, b: Rect, margin: Size) -> bool {
    intersects(a.inflate(margin.width, margin.height), b)
}

/// Smallest rectangle containing both inputs.
pub fn union(a: Rect, b: Rect) -> Rect {
    a.union(b)
}

/// Keep the origin and grow width/height up to `floor`.
pub fn min_size(rect: Rect, floor: Size) -> Rect {
    Rect::from_origin_size(
        rect.origin(),
        Size::new(rect.width().max(floor.width), rect.height().max(floor.height)),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
