use warpkit_geometry::Transform;
use warpkit_image::{DynamicImage, ImageError, PixelFormat};

use crate::{
    border::BorderMode,
    colormap::{self, Colormap},
    crop::{self, Rectangle},
    error::ImgprocError,
    warp::{self, RotateOptions, WarpOptions},
};

// run `$op` on the typed image inside any variant, keeping the variant
macro_rules! dispatch {
    ($image:expr, $img:ident => $op:expr) => {
        match $image {
            DynamicImage::Gray($img) => DynamicImage::Gray($op),
            DynamicImage::Rgb($img) => DynamicImage::Rgb($op),
            DynamicImage::Rgba($img) => DynamicImage::Rgba($op),
        }
    };
}

/// Resampling and colormap operations on a [`DynamicImage`].
///
/// Every operation returns a new image in the same pixel format as the input,
/// except [`apply_colormap`](DynamicImageOps::apply_colormap) which turns a
/// grayscale image into RGB.
pub trait DynamicImageOps: Sized {
    /// See [`warp::warp`].
    fn warp(&self, transform: &Transform, options: &WarpOptions) -> Result<Self, ImgprocError>;

    /// See [`warp::rotate`].
    fn rotate(&self, angle: f64, options: &RotateOptions) -> Result<Self, ImgprocError>;

    /// See [`crop::extract`].
    fn extract(&self, rect: &Rectangle, border: BorderMode) -> Result<Self, ImgprocError>;

    /// See [`colormap::apply_colormap`]. Only grayscale images are accepted.
    fn apply_colormap(&self, cmap: &Colormap) -> Result<Self, ImgprocError>;
}

impl DynamicImageOps for DynamicImage {
    fn warp(&self, transform: &Transform, options: &WarpOptions) -> Result<Self, ImgprocError> {
        Ok(dispatch!(self, img => warp::warp(img, transform, options)?))
    }

    fn rotate(&self, angle: f64, options: &RotateOptions) -> Result<Self, ImgprocError> {
        Ok(dispatch!(self, img => warp::rotate(img, angle, options)?))
    }

    fn extract(&self, rect: &Rectangle, border: BorderMode) -> Result<Self, ImgprocError> {
        Ok(dispatch!(self, img => crop::extract(img, rect, border)?))
    }

    fn apply_colormap(&self, cmap: &Colormap) -> Result<Self, ImgprocError> {
        match self {
            DynamicImage::Gray(img) => Ok(DynamicImage::Rgb(colormap::apply_colormap(
                img, cmap,
            )?)),
            other => Err(ImageError::FormatMismatch {
                expected: PixelFormat::Gray,
                actual: other.format(),
            }
            .into()),
        }
    }
}
