//! Geometric image transformations driven by a [`Transform`](warpkit_geometry::Transform).
//!
//! - [`warp`]: resample through a similarity, affine or projective transform
//! - [`rotate`]: rotate about the image center onto a canvas holding the whole result
//!
//! Both work by inverse mapping: every destination pixel is mapped back into
//! the source and sampled there with the chosen interpolation and border mode.
//!
//! # Examples
//!
//! Rotating an image by 45 degrees:
//!
//! ```
//! use warpkit_image::{Image, ImageSize};
//! use warpkit_imgproc::warp::{rotate, RotateOptions};
//!
//! let src = Image::<u8, 3>::from_size_val(ImageSize { width: 10, height: 10 }, 255).unwrap();
//! let dst = rotate(&src, std::f64::consts::FRAC_PI_4, &RotateOptions::default()).unwrap();
//! assert!(dst.cols() > 10 && dst.rows() > 10);
//! ```

mod resample;
mod rotate;

pub use resample::warp;
pub use rotate::rotate;

use warpkit_image::ImageSize;

use crate::{border::BorderMode, interpolation::InterpolationMode, parallel::ExecutionStrategy};

/// Options of [`warp`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WarpOptions {
    /// Output size; the source size when `None`.
    pub size: Option<ImageSize>,
    /// Interpolation kernel used to sample the source.
    pub interpolation: InterpolationMode,
    /// How samples outside the source are resolved.
    pub border: BorderMode,
    /// How destination rows are scheduled.
    pub strategy: ExecutionStrategy,
}

impl WarpOptions {
    /// Set the output size.
    pub fn with_size(mut self, size: ImageSize) -> Self {
        self.size = Some(size);
        self
    }

    /// Set the interpolation kernel.
    pub fn with_interpolation(mut self, interpolation: InterpolationMode) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Set the border mode.
    pub fn with_border(mut self, border: BorderMode) -> Self {
        self.border = border;
        self
    }

    /// Set the execution strategy.
    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// Options of [`rotate`].
///
/// The border defaults to [`BorderMode::Zero`], so the canvas corners not
/// covered by the rotated image are black.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RotateOptions {
    /// Interpolation kernel used to sample the source.
    pub interpolation: InterpolationMode,
    /// How samples outside the source are resolved.
    pub border: BorderMode,
    /// How destination rows are scheduled.
    pub strategy: ExecutionStrategy,
}

impl RotateOptions {
    /// Set the interpolation kernel.
    pub fn with_interpolation(mut self, interpolation: InterpolationMode) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Set the border mode.
    pub fn with_border(mut self, border: BorderMode) -> Self {
        self.border = border;
        self
    }

    /// Set the execution strategy.
    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}
