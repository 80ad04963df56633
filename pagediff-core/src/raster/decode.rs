use std::path::Path;

use image::RgbImage;

use crate::foundation::error::{PagediffError, PagediffResult};

/// Decode encoded image bytes (any format enabled on the `image` crate) into RGB8.
///
/// Alpha, if present, is dropped.
pub fn decode_image(bytes: &[u8]) -> PagediffResult<RgbImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| PagediffError::decode(format!("decode image from memory: {e}")))?;
    Ok(dyn_img.to_rgb8())
}

/// Read and decode an image file.
pub fn open_image(path: impl AsRef<Path>) -> PagediffResult<RgbImage> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .map_err(|e| PagediffError::decode(format!("read '{}': {e}", path.display())))?;
    decode_image(&bytes)
        .map_err(|e| PagediffError::decode(format!("'{}': {e}", path.display())))
}

#[cfg(test)]
#[path = "../../tests/unit/raster/decode.rs"]
mod tests;
