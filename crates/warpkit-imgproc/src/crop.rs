use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};
use warpkit_image::{Image, ImageDtype, ImageSize};

use crate::{border::BorderMode, error::ImgprocError};

/// An axis aligned region in pixel coordinates, `right` and `bottom` exclusive.
///
/// The rectangle may extend past the image in any direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rectangle {
    /// First column.
    pub left: i64,
    /// First row.
    pub top: i64,
    /// One past the last column.
    pub right: i64,
    /// One past the last row.
    pub bottom: i64,
}

impl Rectangle {
    /// Create a rectangle from its edges.
    pub fn new(left: i64, top: i64, right: i64, bottom: i64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Width of the rectangle, negative when the edges are swapped.
    pub fn width(&self) -> i64 {
        self.right.saturating_sub(self.left)
    }

    /// Height of the rectangle, negative when the edges are swapped.
    pub fn height(&self) -> i64 {
        self.bottom.saturating_sub(self.top)
    }

    /// The size of an image covering the rectangle.
    ///
    /// # Errors
    ///
    /// Fails with [`ImgprocError::InvalidRectangle`] when the width or height
    /// is not positive.
    pub fn size(&self) -> Result<ImageSize, ImgprocError> {
        let (width, height) = (self.width(), self.height());
        if width <= 0 || height <= 0 {
            return Err(ImgprocError::InvalidRectangle {
                left: self.left,
                top: self.top,
                right: self.right,
                bottom: self.bottom,
            });
        }
        Ok(ImageSize {
            width: width as usize,
            height: height as usize,
        })
    }
}

/// Extract a rectangular region of an image.
///
/// Output pixel `(i, j)` is the source pixel `(top + i, left + j)`; coordinates
/// outside the source are resolved through `border`. No interpolation is
/// involved.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `rect` - The region to extract, possibly out of bounds.
/// * `border` - How pixels outside the source are filled.
///
/// # Examples
///
/// ```rust
/// use warpkit_image::{Image, ImageSize};
/// use warpkit_imgproc::{border::BorderMode, crop::{extract, Rectangle}};
///
/// let image = Image::<_, 1>::new(ImageSize { width: 4, height: 4 }, vec![
///     0u8, 1, 2, 3,
///     4u8, 5, 6, 7,
///     8u8, 9, 10, 11,
///     12u8, 13, 14, 15
/// ]).unwrap();
///
/// let cropped = extract(&image, &Rectangle::new(1, 1, 3, 3), BorderMode::Zero).unwrap();
/// assert_eq!(cropped.as_slice(), &[5u8, 6, 9, 10]);
///
/// let padded = extract(&image, &Rectangle::new(-1, 0, 1, 1), BorderMode::Zero).unwrap();
/// assert_eq!(padded.as_slice(), &[0u8, 0]);
/// ```
pub fn extract<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    rect: &Rectangle,
    border: BorderMode,
) -> Result<Image<T, C>, ImgprocError> {
    let size = rect.size()?;
    let mut dst = Image::<T, C>::from_size_val(size, T::default())?;

    log::debug!("extract {rect:?} from {} with {border:?} border", src.size());

    let (src_rows, src_cols) = (src.rows(), src.cols());
    let src_data = src.as_slice();

    dst.as_slice_mut()
        .par_chunks_exact_mut(size.width * C)
        .enumerate()
        .for_each(|(i, dst_row)| {
            let Some(r) = border.resolve(to_index(rect.top, i), src_rows) else {
                return;
            };
            for (j, dst_pixel) in dst_row.chunks_exact_mut(C).enumerate() {
                if let Some(c) = border.resolve(to_index(rect.left, j), src_cols) {
                    let base = (r * src_cols + c) * C;
                    dst_pixel.copy_from_slice(&src_data[base..base + C]);
                }
            }
        });

    Ok(dst)
}

#[inline]
fn to_index(origin: i64, offset: usize) -> isize {
    origin.saturating_add(offset as i64) as isize
}
