#![deny(missing_docs)]
//! Image types and traits for generating and manipulating images

/// image representation for resampling purposes.
pub mod image;

/// runtime-tagged images over a closed set of pixel formats.
pub mod dynamic;

/// Error types for the image module.
pub mod error;

pub use crate::dynamic::{Color, DynamicImage, PixelFormat};
pub use crate::error::ImageError;
pub use crate::image::{Image, ImageDtype, ImageSize};
