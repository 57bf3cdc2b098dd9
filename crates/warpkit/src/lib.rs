#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use warpkit_image as image;

#[doc(inline)]
pub use warpkit_linalg as linalg;

#[doc(inline)]
pub use warpkit_geometry as geometry;

#[doc(inline)]
pub use warpkit_imgproc as imgproc;
