use crate::dynamic::PixelFormat;

/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when an image dimension is zero or the image is too large to store.
    #[error("Invalid image size rows={0} cols={1}")]
    InvalidImageSize(usize, usize),

    /// Error when the data length does not match the image size.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when a pixel index is out of bounds.
    #[error("Pixel index (row={0}, col={1}) is out of bounds for image of size {2}x{3}")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when a value cannot be represented in the target element type.
    #[error("Failed to cast image data")]
    CastError,

    /// Error when a color does not match the pixel format of a dynamic image.
    #[error("Pixel format mismatch: expected {expected}, got {actual}")]
    FormatMismatch {
        /// The format of the image.
        expected: PixelFormat,
        /// The format of the provided value.
        actual: PixelFormat,
    },
}
