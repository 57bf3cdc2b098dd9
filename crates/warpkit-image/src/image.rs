use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use warpkit_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// Number of pixels covered by the size, saturating at `usize::MAX`.
    pub fn area(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    /// Check that both dimensions are positive and the pixel count fits in a `usize`.
    pub fn validate(&self) -> Result<(), ImageError> {
        self.num_elements(1).map(|_| ())
    }

    /// Number of values in an image of this size with `channels` values per pixel.
    ///
    /// Fails with [`ImageError::InvalidImageSize`] when a dimension is zero or
    /// the count overflows a `usize`.
    pub fn num_elements(&self, channels: usize) -> Result<usize, ImageError> {
        let invalid = || ImageError::InvalidImageSize(self.height, self.width);
        if self.width == 0 || self.height == 0 {
            return Err(invalid());
        }
        self.width
            .checked_mul(self.height)
            .and_then(|area| area.checked_mul(channels))
            .ok_or_else(invalid)
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Trait for image element types.
///
/// `from_f32` defines how a value computed in floating point (for example the
/// output of a convolution) is brought back into the element range: integer
/// types round and saturate, floating point passes through.
///
/// Send and Sync is required to split the destination buffer across threads.
pub trait ImageDtype: Copy + Default + Into<f32> + Send + Sync + 'static {
    /// Convert a f32 value to the image data type.
    fn from_f32(x: f32) -> Self;
}

impl ImageDtype for f32 {
    fn from_f32(x: f32) -> Self {
        x
    }
}

impl ImageDtype for u8 {
    fn from_f32(x: f32) -> Self {
        x.round().clamp(0.0, 255.0) as u8
    }
}

impl ImageDtype for u16 {
    fn from_f32(x: f32) -> Self {
        x.round().clamp(0.0, 65535.0) as u16
    }
}

/// Represents an image with pixel data.
///
/// The pixels are stored in a contiguous row-major buffer with `CHANNELS`
/// interleaved values per pixel. The image exclusively owns its buffer; every
/// operation producing a new image allocates a new one.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T, const CHANNELS: usize> {
    size: ImageSize,
    data: Vec<T>,
}

impl<T, const CHANNELS: usize> Image<T, CHANNELS>
where
    T: Copy,
{
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The pixel data of the image.
    ///
    /// # Errors
    ///
    /// If either dimension is zero or the length of the pixel data does not
    /// match the image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use warpkit_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 3>::new(
    ///    ImageSize {
    ///       width: 10,
    ///       height: 20,
    ///    },
    ///    vec![0u8; 10 * 20 * 3],
    /// ).unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.num_channels(), 3);
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        let expected = size.num_elements(CHANNELS)?;

        if data.len() != expected {
            return Err(ImageError::InvalidChannelShape(data.len(), expected));
        }

        Ok(Self { size, data })
    }

    /// Reserve an empty buffer for the pixel data of an image of `size`.
    ///
    /// Sizes whose buffer cannot be allocated are rejected instead of aborting.
    fn allocate(size: ImageSize) -> Result<Vec<T>, ImageError> {
        let len = size.num_elements(CHANNELS)?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| ImageError::InvalidImageSize(size.height, size.width))?;
        Ok(data)
    }

    /// Create a new image with the given size filled with a single value.
    ///
    /// # Examples
    ///
    /// ```
    /// use warpkit_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 3>::from_size_val(
    ///   ImageSize {
    ///     width: 10,
    ///     height: 20,
    ///   }, 0u8).unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.num_channels(), 3);
    /// ```
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError> {
        let mut data = Self::allocate(size)?;
        data.resize(size.area() * CHANNELS, val);
        Image::new(size, data)
    }

    /// Create a new image where every pixel is given by `f(row, col)`.
    pub fn from_fn(
        size: ImageSize,
        mut f: impl FnMut(usize, usize) -> [T; CHANNELS],
    ) -> Result<Self, ImageError> {
        let mut data = Self::allocate(size)?;
        for row in 0..size.height {
            for col in 0..size.width {
                data.extend_from_slice(&f(row, col));
            }
        }

        Image::new(size, data)
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.size.width
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.size.height
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        CHANNELS
    }

    /// Get the pixel data as a flat row-major slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the pixel data as a flat mutable row-major slice.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the image and return its buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Get the channel values of the pixel at `(row, col)`.
    ///
    /// Returns `None` if the coordinate is outside the image.
    pub fn pixel(&self, row: usize, col: usize) -> Option<[T; CHANNELS]> {
        if row >= self.rows() || col >= self.cols() {
            return None;
        }
        let offset = (row * self.cols() + col) * CHANNELS;
        let mut px = [self.data[offset]; CHANNELS];
        px.copy_from_slice(&self.data[offset..offset + CHANNELS]);
        Some(px)
    }

    /// Set the channel values of the pixel at `(row, col)`.
    pub fn set_pixel(
        &mut self,
        row: usize,
        col: usize,
        value: [T; CHANNELS],
    ) -> Result<(), ImageError> {
        if row >= self.rows() || col >= self.cols() {
            return Err(ImageError::PixelIndexOutOfBounds(
                row,
                col,
                self.rows(),
                self.cols(),
            ));
        }
        let offset = (row * self.cols() + col) * CHANNELS;
        self.data[offset..offset + CHANNELS].copy_from_slice(&value);
        Ok(())
    }

    /// Set every pixel of the image to `value`.
    pub fn fill(&mut self, value: [T; CHANNELS]) {
        self.data
            .chunks_exact_mut(CHANNELS)
            .for_each(|px| px.copy_from_slice(&value));
    }

    /// Cast the pixel data of the image to a different type.
    ///
    /// # Errors
    ///
    /// If a value cannot be represented in the target type, an error is returned.
    pub fn cast<U>(&self) -> Result<Image<U, CHANNELS>, ImageError>
    where
        U: num_traits::NumCast + Copy,
        T: num_traits::NumCast,
    {
        let casted_data = self
            .data
            .iter()
            .map(|&x| U::from(x).ok_or(ImageError::CastError))
            .collect::<Result<Vec<U>, ImageError>>()?;

        Image::new(self.size, casted_data)
    }
}

#[cfg(test)]
mod tests {
    use crate::image::{Image, ImageError, ImageSize};

    #[test]
    fn image_size() {
        let image_size = ImageSize {
            width: 10,
            height: 20,
        };
        assert_eq!(image_size.width, 10);
        assert_eq!(image_size.height, 20);
        assert_eq!(image_size.area(), 200);
    }

    #[test]
    fn image_smoke() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 10,
                height: 20,
            },
            vec![0u8; 10 * 20 * 3],
        )?;
        assert_eq!(image.size().width, 10);
        assert_eq!(image.size().height, 20);
        assert_eq!(image.rows(), 20);
        assert_eq!(image.cols(), 10);
        assert_eq!(image.num_channels(), 3);

        Ok(())
    }

    #[test]
    fn image_zero_size_rejected() {
        let res = Image::<u8, 1>::new(
            ImageSize {
                width: 0,
                height: 4,
            },
            vec![],
        );
        assert_eq!(res, Err(ImageError::InvalidImageSize(4, 0)));
    }

    #[test]
    fn image_size_overflow_rejected() {
        let huge = ImageSize {
            width: usize::MAX / 2,
            height: 3,
        };
        assert_eq!(huge.validate(), Err(ImageError::InvalidImageSize(3, usize::MAX / 2)));
        assert_eq!(huge.area(), usize::MAX);

        // the pixel count fits but the value count does not
        let wide = ImageSize {
            width: usize::MAX / 2,
            height: 1,
        };
        assert_eq!(wide.validate(), Ok(()));
        assert_eq!(wide.num_elements(1), Ok(usize::MAX / 2));
        assert_eq!(
            wide.num_elements(3),
            Err(ImageError::InvalidImageSize(1, usize::MAX / 2))
        );

        let res = Image::<u8, 3>::new(wide, vec![]);
        assert_eq!(res, Err(ImageError::InvalidImageSize(1, usize::MAX / 2)));
        let res = Image::<u8, 3>::from_size_val(wide, 0);
        assert_eq!(res, Err(ImageError::InvalidImageSize(1, usize::MAX / 2)));
        let res = Image::<u8, 3>::from_fn(wide, |_, _| [0, 0, 0]);
        assert_eq!(res, Err(ImageError::InvalidImageSize(1, usize::MAX / 2)));
    }

    #[test]
    fn image_unallocatable_size_rejected() {
        // representable element count, but no allocator can provide it
        let size = ImageSize {
            width: usize::MAX / 4,
            height: 1,
        };
        let res = Image::<u16, 1>::from_size_val(size, 0);
        assert_eq!(res, Err(ImageError::InvalidImageSize(1, usize::MAX / 4)));
    }

    #[test]
    fn image_data_length_mismatch() {
        let res = Image::<f32, 3>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![0.0; 5],
        );
        assert_eq!(res, Err(ImageError::InvalidChannelShape(5, 12)));
    }

    #[test]
    fn image_pixel_access() -> Result<(), ImageError> {
        let mut image = Image::<u8, 3>::from_size_val(
            ImageSize {
                width: 3,
                height: 2,
            },
            0,
        )?;
        image.set_pixel(1, 2, [1, 2, 3])?;
        assert_eq!(image.pixel(1, 2), Some([1, 2, 3]));
        assert_eq!(image.pixel(0, 0), Some([0, 0, 0]));
        assert_eq!(image.pixel(2, 0), None);
        assert!(image.set_pixel(0, 3, [0, 0, 0]).is_err());

        image.fill([255, 128, 0]);
        assert!(image
            .as_slice()
            .chunks_exact(3)
            .all(|px| px == [255, 128, 0]));

        Ok(())
    }

    #[test]
    fn image_from_fn() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::from_fn(
            ImageSize {
                width: 3,
                height: 2,
            },
            |row, col| [(row * 3 + col) as u8],
        )?;
        assert_eq!(image.as_slice(), &[0, 1, 2, 3, 4, 5]);
        Ok(())
    }

    #[test]
    fn image_cast() -> Result<(), ImageError> {
        let image_u8 = Image::<u8, 3>::new(
            ImageSize {
                height: 2,
                width: 1,
            },
            vec![0, 1, 2, 3, 4, 5],
        )?;
        let image_f32: Image<f32, 3> = image_u8.cast()?;
        assert_eq!(image_f32.pixel(1, 0), Some([3.0, 4.0, 5.0]));

        Ok(())
    }

    #[test]
    fn dtype_from_f32_saturates() {
        use crate::image::ImageDtype;
        assert_eq!(u8::from_f32(-3.0), 0);
        assert_eq!(u8::from_f32(300.0), 255);
        assert_eq!(u8::from_f32(127.5), 128);
        assert_eq!(u16::from_f32(70000.0), 65535);
        assert_eq!(f32::from_f32(-1.5), -1.5);
    }
}
