//! Thin adapter over `image` / `imageproc` for the pixel primitives the composer needs.

pub(crate) mod decode;
pub(crate) mod ops;
