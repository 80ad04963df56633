use image::imageops::{self, FilterType};
use image::{GrayImage, Luma, RgbImage};
use imageproc::contours::{BorderType, find_contours};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut};
use imageproc::morphology::{Mask, grayscale_dilate};
use imageproc::rect::Rect as ProcRect;

use crate::foundation::core::{PixelRect, Rect, Rgb8, Size};
use crate::foundation::error::{PagediffError, PagediffResult};

const ON: u8 = 255;

pub(crate) fn ensure_same_dimensions(a: &RgbImage, b: &RgbImage) -> PagediffResult<()> {
    if a.dimensions() != b.dimensions() {
        return Err(PagediffError::dimension_mismatch(
            a.dimensions(),
            b.dimensions(),
        ));
    }
    Ok(())
}

/// Per-channel `|a - b|`.
pub(crate) fn absolute_difference(a: &RgbImage, b: &RgbImage) -> PagediffResult<RgbImage> {
    ensure_same_dimensions(a, b)?;
    Ok(RgbImage::from_fn(a.width(), a.height(), |x, y| {
        let (pa, pb) = (a.get_pixel(x, y), b.get_pixel(x, y));
        image::Rgb([
            pa[0].abs_diff(pb[0]),
            pa[1].abs_diff(pb[1]),
            pa[2].abs_diff(pb[2]),
        ])
    }))
}

/// Per-channel binary threshold: channels `>= level` become 255, the rest 0.
pub(crate) fn binary_threshold(diff: &RgbImage, level: f64) -> RgbImage {
    let mut out = diff.clone();
    for c in out.iter_mut() {
        *c = if f64::from(*c) >= level { ON } else { 0 };
    }
    out
}

/// Luma conversion. Any non-zero channel of a binary mask stays non-zero.
pub(crate) fn to_gray(mask: &RgbImage) -> GrayImage {
    imageops::grayscale(mask)
}

/// One iteration of dilation with a `size` x `size` all-ones element anchored at its centre.
/// Pixels outside the image count as off.
pub(crate) fn dilate(mask: &GrayImage, size: u32) -> PagediffResult<GrayImage> {
    let anchor = u8::try_from(size / 2).map_err(|_| {
        PagediffError::validation(format!("structuring element {size} is too large"))
    })?;
    let element = GrayImage::from_pixel(size, size, Luma([ON]));
    let mask_shape = Mask::from_image(&element, anchor, anchor);
    Ok(grayscale_dilate(mask, &mask_shape))
}

/// Bounding boxes of the outermost contours of the non-zero areas of `mask`.
///
/// The mask is traced inside a one-pixel off frame so areas touching the image edge still get
/// an outer border.
pub(crate) fn external_contour_rects(mask: &GrayImage) -> Vec<Rect> {
    let (w, h) = mask.dimensions();
    let mut framed = GrayImage::new(w + 2, h + 2);
    imageops::replace(&mut framed, mask, 1, 1);

    find_contours::<i32>(&framed)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .filter_map(|c| {
            let xs = c.points.iter().map(|p| p.x - 1);
            let ys = c.points.iter().map(|p| p.y - 1);
            let (x0, x1) = (xs.clone().min()?, xs.max()?);
            let (y0, y1) = (ys.clone().min()?, ys.max()?);
            Some(Rect::new(
                f64::from(x0.max(0)),
                f64::from(y0.max(0)),
                f64::from(x1 + 1).min(f64::from(w)),
                f64::from(y1 + 1).min(f64::from(h)),
            ))
        })
        .collect()
}

/// Copy the pixels under `rect` out of `image`.
pub(crate) fn crop(image: &RgbImage, rect: PixelRect) -> RgbImage {
    imageops::crop_imm(image, rect.x, rect.y, rect.width, rect.height).to_image()
}

/// Bilinear resize. Zero target dimensions are bumped to one pixel.
pub(crate) fn resize(image: &RgbImage, width: u32, height: u32) -> RgbImage {
    imageops::resize(image, width.max(1), height.max(1), FilterType::Triangle)
}

/// Plain pixel copy of `src` with its top-left at `at`. Pixels falling outside `dst` are
/// dropped.
pub(crate) fn copy_into(dst: &mut RgbImage, src: &RgbImage, at: PixelRect) {
    imageops::replace(dst, src, i64::from(at.x), i64::from(at.y));
}

/// Surround `image` with a solid `thickness`-pixel border.
pub(crate) fn pad_border(
    image: &RgbImage,
    thickness: u32,
    color: Rgb8,
) -> PagediffResult<RgbImage> {
    let grow = |side: u32| {
        thickness
            .checked_mul(2)
            .and_then(|t| side.checked_add(t))
            .ok_or_else(|| {
                PagediffError::validation(format!("border of {thickness} px is too large"))
            })
    };
    let mut out = RgbImage::from_pixel(grow(image.width())?, grow(image.height())?, color.into());
    imageops::replace(&mut out, image, i64::from(thickness), i64::from(thickness));
    Ok(out)
}

/// Paint a filled rectangle, clipped to the image.
pub(crate) fn fill_rect(image: &mut RgbImage, rect: PixelRect, color: Rgb8) {
    if rect.is_empty() {
        return;
    }
    draw_filled_rect_mut(image, proc_rect(rect), color.into());
}

/// `saturate(round(a * weight_a + b * weight_b))` per channel.
pub(crate) fn alpha_blend(
    a: &RgbImage,
    weight_a: f64,
    b: &RgbImage,
    weight_b: f64,
) -> PagediffResult<RgbImage> {
    ensure_same_dimensions(a, b)?;
    let mut out = a.clone();
    for (o, m) in out.iter_mut().zip(b.iter()) {
        let v = f64::from(*o) * weight_a + f64::from(*m) * weight_b;
        *o = v.round().clamp(0.0, 255.0) as u8;
    }
    Ok(out)
}

/// Re-diff two equally sized crops and tint the changed channels of both in place.
pub(crate) fn overlay_changes(
    before: &mut RgbImage,
    after: &mut RgbImage,
    level: f64,
    source_weight: f64,
    mask_weight: f64,
) -> PagediffResult<()> {
    let mask = binary_threshold(&absolute_difference(before, after)?, level);
    *before = alpha_blend(before, source_weight, &mask, mask_weight)?;
    *after = alpha_blend(after, source_weight, &mask, mask_weight)?;
    Ok(())
}

/// Grid lines every `cell` pixels, starting at the top-left corner.
pub(crate) fn draw_grid(image: &mut RgbImage, cell: Size, thickness: u32, color: Rgb8) {
    let (w, h) = image.dimensions();
    let step_x = (cell.width as u32).max(1) as usize;
    let step_y = (cell.height as u32).max(1) as usize;
    for x in (0..w).step_by(step_x) {
        fill_rect(image, PixelRect::new(x, 0, thickness, h), color);
    }
    for y in (0..h).step_by(step_y) {
        fill_rect(image, PixelRect::new(0, y, w, thickness), color);
    }
}

/// Outline `rect` from the outside with `thickness` one-pixel rings, clipped to the image.
pub(crate) fn draw_border(image: &mut RgbImage, rect: PixelRect, thickness: u32, color: Rgb8) {
    for ring in 1..=thickness {
        let r = ProcRect::at(rect.x as i32 - ring as i32, rect.y as i32 - ring as i32)
            .of_size(rect.width + ring * 2, rect.height + ring * 2);
        draw_hollow_rect_mut(image, r, color.into());
    }
}

fn proc_rect(rect: PixelRect) -> ProcRect {
    ProcRect::at(rect.x as i32, rect.y as i32).of_size(rect.width, rect.height)
}

#[cfg(test)]
#[path = "../../tests/unit/raster/ops.rs"]
mod tests;
