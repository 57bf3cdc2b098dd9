use thiserror::Error;
use warpkit_geometry::{ErrorKind, GeometryError};
use warpkit_image::ImageError;

use crate::parallel::ParallelError;

/// Errors raised by the resampling and colormap operations.
#[derive(Error, Debug, PartialEq)]
pub enum ImgprocError {
    /// Invalid image construction or access.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// A transform could not be planned, inverted or applied.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// The worker pool could not run the operation.
    #[error(transparent)]
    Parallel(#[from] ParallelError),

    /// The extract rectangle has a non-positive width or height.
    #[error("rectangle ({left}, {top}, {right}, {bottom}) must have right > left and bottom > top")]
    InvalidRectangle {
        /// Left edge, inclusive.
        left: i64,
        /// Top edge, inclusive.
        top: i64,
        /// Right edge, exclusive.
        right: i64,
        /// Bottom edge, exclusive.
        bottom: i64,
    },

    /// The colormap domain bounds are not finite or are inverted.
    #[error("colormap domain must satisfy min <= max with finite bounds, got [{0}, {1}]")]
    InvalidColormapDomain(f32, f32),

    /// A color ramp violates its stop ordering.
    #[error("invalid color ramp: {0}")]
    InvalidColorRamp(String),
}

impl ImgprocError {
    /// The failure category of the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ImgprocError::Geometry(e) => e.kind(),
            ImgprocError::Parallel(_) => ErrorKind::Computation,
            ImgprocError::Image(_)
            | ImgprocError::InvalidRectangle { .. }
            | ImgprocError::InvalidColormapDomain(..)
            | ImgprocError::InvalidColorRamp(_) => ErrorKind::Validation,
        }
    }
}
