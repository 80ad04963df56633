/// Convenience result type used across pagediff.
pub type PagediffResult<T> = Result<T, PagediffError>;

/// Top-level error taxonomy used by the diff APIs.
///
/// "No differences" is not an error: it is an empty region list.
#[derive(thiserror::Error, Debug)]
pub enum PagediffError {
    /// The two input images do not share dimensions.
    #[error("dimension mismatch: before is {}x{}, after is {}x{}", before.0, before.1, after.0, after.1)]
    DimensionMismatch {
        /// `(width, height)` of the first image.
        before: (u32, u32),
        /// `(width, height)` of the second image.
        after: (u32, u32),
    },

    /// Input bytes could not be read or decoded as an image.
    #[error("decode error: {0}")]
    Decode(String),

    /// A frame was asked to derive a scale from a zero or invalid dimension.
    #[error("degenerate frame: {0}")]
    DegenerateFrame(String),

    /// Invalid user-provided settings or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PagediffError {
    /// Build a [`PagediffError::DimensionMismatch`] value.
    pub fn dimension_mismatch(before: (u32, u32), after: (u32, u32)) -> Self {
        Self::DimensionMismatch { before, after }
    }

    /// Build a [`PagediffError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`PagediffError::DegenerateFrame`] value.
    pub fn degenerate_frame(msg: impl Into<String>) -> Self {
        Self::DegenerateFrame(msg.into())
    }

    /// Build a [`PagediffError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
