pub use kurbo::{Point, Rect, Size, Vec2};

/// Straight (non-premultiplied) RGB8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Pure red, used for highlights.
    pub const RED: Self = Self::new(255, 0, 0);
    /// Mid gray, used for alignment grids.
    pub const GRAY: Self = Self::new(128, 128, 128);

    /// Build a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb8> for image::Rgb<u8> {
    fn from(c: Rgb8) -> Self {
        image::Rgb([c.r, c.g, c.b])
    }
}

/// Axis-aligned rectangle in whole pixels.
///
/// Produced from real-valued geometry by truncating origin and size toward zero, which is how
/// resolved frame bounds become buffer coordinates. Values within [`PIXEL_SNAP`] of a whole
/// pixel snap to it first, so `7.0 * (600.0 / 7.0)` stays 600 pixels wide.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PixelRect {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelRect {
    /// Build a pixel rectangle from its origin and size.
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Truncate a real rectangle to pixels. Negative coordinates saturate at zero.
    pub fn from_rect(rect: Rect) -> Self {
        let rect = rect.abs();
        Self {
            x: to_pixels(rect.x0),
            y: to_pixels(rect.y0),
            width: to_pixels(rect.width()),
            height: to_pixels(rect.height()),
        }
    }

    /// Exclusive right edge.
    pub fn right(self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge.
    pub fn bottom(self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// True when the rectangle covers no pixels.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Grow a zero width or height to one pixel.
    pub fn at_least_one_pixel(self) -> Self {
        Self {
            width: self.width.max(1),
            height: self.height.max(1),
            ..self
        }
    }

    /// Intersect with a `width` x `height` buffer anchored at the origin.
    ///
    /// Returns `None` when nothing of the rectangle lies inside the buffer.
    pub fn clip_to(self, width: u32, height: u32) -> Option<Self> {
        let right = self.right().min(width);
        let bottom = self.bottom().min(height);
        if self.x >= right || self.y >= bottom {
            return None;
        }
        Some(Self {
            x: self.x,
            y: self.y,
            width: right - self.x,
            height: bottom - self.y,
        })
    }

    /// Real-valued rectangle with the same extent.
    pub fn to_rect(self) -> Rect {
        Rect::new(
            f64::from(self.x),
            f64::from(self.y),
            f64::from(self.right()),
            f64::from(self.bottom()),
        )
    }
}

/// Distance from a whole pixel below which a coordinate is treated as exact.
pub const PIXEL_SNAP: f64 = 1e-6;

fn to_pixels(v: f64) -> u32 {
    let nearest = v.round();
    let v = if (v - nearest).abs() < PIXEL_SNAP {
        nearest
    } else {
        v
    };
    v.max(0.0) as u32
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
