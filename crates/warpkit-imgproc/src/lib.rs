#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// border handling for out of range samples.
pub mod border;

/// scalar to color mapping module.
pub mod colormap;

/// image region extraction module.
pub mod crop;

/// resampling operations on runtime-tagged images.
pub mod dynamic;

/// Error types for the imgproc module.
pub mod error;

/// utilities for interpolation.
pub mod interpolation;

/// module containing parallization utilities.
pub mod parallel;

/// image geometric transformations module.
pub mod warp;

pub use error::ImgprocError;
