use crate::{
    error::ImageError,
    image::{Image, ImageSize},
};

/// Pixel formats supported by [`DynamicImage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PixelFormat {
    /// Single 8-bit grayscale channel.
    Gray,
    /// Three 8-bit channels: red, green, blue.
    Rgb,
    /// Four 8-bit channels: red, green, blue, alpha.
    Rgba,
}

impl PixelFormat {
    /// Number of interleaved channels per pixel.
    pub fn channels(&self) -> usize {
        match self {
            PixelFormat::Gray => 1,
            PixelFormat::Rgb => 3,
            PixelFormat::Rgba => 4,
        }
    }

    /// The zero value of the format, used to fill out-of-bounds samples.
    pub fn zero(&self) -> Color {
        match self {
            PixelFormat::Gray => Color::Gray(0),
            PixelFormat::Rgb => Color::Rgb([0; 3]),
            PixelFormat::Rgba => Color::Rgba([0; 4]),
        }
    }
}

impl std::fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            PixelFormat::Gray => "Gray",
            PixelFormat::Rgb => "Rgb",
            PixelFormat::Rgba => "Rgba",
        };
        f.write_str(name)
    }
}

/// A single pixel value tagged with its format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    /// Grayscale intensity.
    Gray(u8),
    /// Red, green, blue.
    Rgb([u8; 3]),
    /// Red, green, blue, alpha.
    Rgba([u8; 4]),
}

impl Color {
    /// The pixel format of the color.
    pub fn format(&self) -> PixelFormat {
        match self {
            Color::Gray(_) => PixelFormat::Gray,
            Color::Rgb(_) => PixelFormat::Rgb,
            Color::Rgba(_) => PixelFormat::Rgba,
        }
    }
}

/// An 8-bit image whose pixel format is only known at runtime.
///
/// This is the closed set of formats a binding layer hands over; every
/// variant owns a statically typed [`Image`].
#[derive(Debug, Clone, PartialEq)]
pub enum DynamicImage {
    /// Grayscale image.
    Gray(Image<u8, 1>),
    /// RGB image.
    Rgb(Image<u8, 3>),
    /// RGBA image.
    Rgba(Image<u8, 4>),
}

impl DynamicImage {
    /// Create a zero-filled image with the given size and format.
    pub fn new(size: ImageSize, format: PixelFormat) -> Result<Self, ImageError> {
        Ok(match format {
            PixelFormat::Gray => DynamicImage::Gray(Image::from_size_val(size, 0)?),
            PixelFormat::Rgb => DynamicImage::Rgb(Image::from_size_val(size, 0)?),
            PixelFormat::Rgba => DynamicImage::Rgba(Image::from_size_val(size, 0)?),
        })
    }

    /// The pixel format of the image.
    pub fn format(&self) -> PixelFormat {
        match self {
            DynamicImage::Gray(_) => PixelFormat::Gray,
            DynamicImage::Rgb(_) => PixelFormat::Rgb,
            DynamicImage::Rgba(_) => PixelFormat::Rgba,
        }
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        match self {
            DynamicImage::Gray(img) => img.size(),
            DynamicImage::Rgb(img) => img.size(),
            DynamicImage::Rgba(img) => img.size(),
        }
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.size().height
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.size().width
    }

    /// Get the pixel at `(row, col)`, or `None` when out of bounds.
    pub fn pixel(&self, row: usize, col: usize) -> Option<Color> {
        match self {
            DynamicImage::Gray(img) => img.pixel(row, col).map(|[v]| Color::Gray(v)),
            DynamicImage::Rgb(img) => img.pixel(row, col).map(Color::Rgb),
            DynamicImage::Rgba(img) => img.pixel(row, col).map(Color::Rgba),
        }
    }

    /// Set the pixel at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Fails if the coordinate is out of bounds or the color format differs
    /// from the image format.
    pub fn set_pixel(&mut self, row: usize, col: usize, color: Color) -> Result<(), ImageError> {
        match (self, color) {
            (DynamicImage::Gray(img), Color::Gray(v)) => img.set_pixel(row, col, [v]),
            (DynamicImage::Rgb(img), Color::Rgb(v)) => img.set_pixel(row, col, v),
            (DynamicImage::Rgba(img), Color::Rgba(v)) => img.set_pixel(row, col, v),
            (img, color) => Err(ImageError::FormatMismatch {
                expected: img.format(),
                actual: color.format(),
            }),
        }
    }

    /// Set every pixel of the image to `color`.
    pub fn fill(&mut self, color: Color) -> Result<(), ImageError> {
        match (self, color) {
            (DynamicImage::Gray(img), Color::Gray(v)) => img.fill([v]),
            (DynamicImage::Rgb(img), Color::Rgb(v)) => img.fill(v),
            (DynamicImage::Rgba(img), Color::Rgba(v)) => img.fill(v),
            (img, color) => {
                return Err(ImageError::FormatMismatch {
                    expected: img.format(),
                    actual: color.format(),
                })
            }
        }
        Ok(())
    }
}

impl From<Image<u8, 1>> for DynamicImage {
    fn from(image: Image<u8, 1>) -> Self {
        DynamicImage::Gray(image)
    }
}

impl From<Image<u8, 3>> for DynamicImage {
    fn from(image: Image<u8, 3>) -> Self {
        DynamicImage::Rgb(image)
    }
}

impl From<Image<u8, 4>> for DynamicImage {
    fn from(image: Image<u8, 4>) -> Self {
        DynamicImage::Rgba(image)
    }
}
