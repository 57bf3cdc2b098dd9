use warpkit_image::{Image, ImageDtype};

/// How samples outside the source image are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BorderMode {
    /// Samples outside the image read as zero (black).
    ///
    /// Example: ...d c b a | 0 0 0 0...
    #[default]
    Zero,

    /// Clamp to the nearest edge pixel.
    ///
    /// Example: ...d c b a | a a a a...
    Replicate,

    /// Reflect about the image edge, repeating the edge pixel.
    ///
    /// Example: ...d c b a | a b c d...
    Mirror,
}

impl BorderMode {
    #[inline]
    fn mirror(i: isize, len: usize) -> usize {
        let len = len as isize;
        let period = 2 * len;
        let r = i.rem_euclid(period);
        if r < len {
            r as usize
        } else {
            (period - 1 - r) as usize
        }
    }

    /// Map index `i` along a dimension of length `len` to a valid index.
    ///
    /// Returns `None` when the sample should read as zero, which only happens
    /// for [`BorderMode::Zero`] and out of range indices. `len` must be positive.
    ///
    /// # Example
    ///
    /// ```
    /// use warpkit_imgproc::border::BorderMode;
    ///
    /// assert_eq!(BorderMode::Zero.resolve(-1, 4), None);
    /// assert_eq!(BorderMode::Replicate.resolve(-3, 4), Some(0));
    /// assert_eq!(BorderMode::Mirror.resolve(-1, 4), Some(0));
    /// assert_eq!(BorderMode::Mirror.resolve(5, 4), Some(2));
    /// ```
    #[inline]
    pub fn resolve(&self, i: isize, len: usize) -> Option<usize> {
        if i >= 0 && (i as usize) < len {
            return Some(i as usize);
        }
        match self {
            BorderMode::Zero => None,
            BorderMode::Replicate => Some(i.clamp(0, len as isize - 1) as usize),
            BorderMode::Mirror => Some(Self::mirror(i, len)),
        }
    }

    /// Read the pixel at `(row, col)`, resolving out of range coordinates.
    #[inline]
    pub fn sample<T: ImageDtype, const C: usize>(
        &self,
        image: &Image<T, C>,
        row: isize,
        col: isize,
    ) -> [f32; C] {
        let (Some(r), Some(c)) = (
            self.resolve(row, image.rows()),
            self.resolve(col, image.cols()),
        ) else {
            return [0.0; C];
        };

        let base = (r * image.cols() + c) * C;
        let data = &image.as_slice()[base..base + C];
        std::array::from_fn(|k| data[k].into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warpkit_image::{ImageError, ImageSize};

    #[test]
    fn resolve_in_range_is_identity() {
        for mode in [BorderMode::Zero, BorderMode::Replicate, BorderMode::Mirror] {
            for i in 0..5 {
                assert_eq!(mode.resolve(i, 5), Some(i as usize));
            }
        }
    }

    #[test]
    fn resolve_mirror_repeats() {
        // 0 1 2 | 2 1 0 | 0 1 2 | ...
        let got = (-6..9)
            .map(|i| BorderMode::Mirror.resolve(i, 3))
            .collect::<Option<Vec<_>>>();
        assert_eq!(
            got,
            Some(vec![0, 1, 2, 2, 1, 0, 0, 1, 2, 2, 1, 0, 0, 1, 2])
        );
        assert_eq!(BorderMode::Mirror.resolve(-7, 1), Some(0));
    }

    #[test]
    fn resolve_replicate_and_zero() {
        assert_eq!(BorderMode::Replicate.resolve(-100, 3), Some(0));
        assert_eq!(BorderMode::Replicate.resolve(100, 3), Some(2));
        assert_eq!(BorderMode::Zero.resolve(3, 3), None);
        assert_eq!(BorderMode::Zero.resolve(-1, 3), None);
    }

    #[test]
    fn sample_through_border() -> Result<(), ImageError> {
        let img = Image::<u8, 1>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![1, 2, 3, 4],
        )?;
        assert_eq!(BorderMode::Zero.sample(&img, -1, 0), [0.0]);
        assert_eq!(BorderMode::Replicate.sample(&img, -1, 5), [2.0]);
        assert_eq!(BorderMode::Mirror.sample(&img, 2, -1), [3.0]);
        assert_eq!(BorderMode::Zero.sample(&img, 1, 1), [4.0]);
        Ok(())
    }
}
