//! Mapping scalar images to colors through named ramps.
//!
//! A [`Colormap`] pairs a ramp with an optional domain. Bounds left unset are
//! taken from the image at application time, so `Colormap::jet()` stretches
//! any image over the full ramp while `Colormap::jet().with_range(0.0, 255.0)`
//! keeps a fixed mapping across images.
//!
//! ```
//! use warpkit_image::{Image, ImageSize};
//! use warpkit_imgproc::colormap::{apply_colormap, Colormap};
//!
//! let gray = Image::<u8, 1>::new(ImageSize { width: 2, height: 1 }, vec![10, 20]).unwrap();
//! let rgb = apply_colormap(&gray, &Colormap::jet()).unwrap();
//! assert_eq!(rgb.pixel(0, 0), Some([0, 0, 128]));
//! assert_eq!(rgb.pixel(0, 1), Some([128, 0, 0]));
//! ```

mod ramps;

use std::borrow::Cow;

use warpkit_image::{Image, ImageDtype};

use crate::{error::ImgprocError, parallel};

/// A control point of a [`ColorRamp`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColorStop {
    /// Position in `[0, 1]`.
    pub position: f32,
    /// RGB color in `0..=255` units.
    pub color: [f32; 3],
}

/// Piecewise linear color ramp over `[0, 1]`.
///
/// Positions are strictly increasing, starting at `0` and ending at `1`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorRamp {
    stops: Cow<'static, [ColorStop]>,
}

impl ColorRamp {
    /// Create a ramp from its stops.
    ///
    /// # Errors
    ///
    /// Fails with [`ImgprocError::InvalidColorRamp`] when there are fewer than
    /// two stops, the positions are not strictly increasing, or the first and
    /// last positions are not `0` and `1`.
    pub fn new(stops: Vec<ColorStop>) -> Result<Self, ImgprocError> {
        Self::validate(&stops)?;
        Ok(Self {
            stops: Cow::Owned(stops),
        })
    }

    fn validate(stops: &[ColorStop]) -> Result<(), ImgprocError> {
        let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
            return Err(ImgprocError::InvalidColorRamp("ramp has no stops".into()));
        };
        if stops.len() < 2 {
            return Err(ImgprocError::InvalidColorRamp(
                "ramp needs at least two stops".into(),
            ));
        }
        if first.position != 0.0 || last.position != 1.0 {
            return Err(ImgprocError::InvalidColorRamp(format!(
                "ramp must span [0, 1], got [{}, {}]",
                first.position, last.position
            )));
        }
        if let Some(w) = stops.windows(2).find(|w| w[1].position <= w[0].position) {
            return Err(ImgprocError::InvalidColorRamp(format!(
                "stop positions must increase, got {} after {}",
                w[1].position, w[0].position
            )));
        }
        if stops
            .iter()
            .flat_map(|s| s.color.iter())
            .any(|c| !(0.0..=255.0).contains(c))
        {
            return Err(ImgprocError::InvalidColorRamp(
                "stop colors must lie in [0, 255]".into(),
            ));
        }
        Ok(())
    }

    /// The stops of the ramp.
    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// The color at normalized position `t`, clamped into `[0, 1]`.
    pub fn color_at(&self, t: f32) -> [u8; 3] {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        // index of the first stop strictly after t, kept within the last bracket
        let upper = self
            .stops
            .partition_point(|s| s.position <= t)
            .clamp(1, self.stops.len() - 1);
        let (lo, hi) = (&self.stops[upper - 1], &self.stops[upper]);

        let f = (t - lo.position) / (hi.position - lo.position);
        std::array::from_fn(|k| {
            let c = lo.color[k] + (hi.color[k] - lo.color[k]) * f;
            u8::from_f32(c)
        })
    }
}

/// The named ramps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ColormapKind {
    /// Dark blue through cyan, yellow and red to dark red.
    Jet,
    /// Black through red and yellow to white.
    Heat,
    /// Google's perceptually smoother rainbow.
    Turbo,
    /// Perceptually uniform purple to yellow.
    Viridis,
}

impl ColormapKind {
    /// Lowercase name of the ramp.
    pub fn name(&self) -> &'static str {
        match self {
            ColormapKind::Jet => "jet",
            ColormapKind::Heat => "heat",
            ColormapKind::Turbo => "turbo",
            ColormapKind::Viridis => "viridis",
        }
    }

    /// The stop table of the ramp.
    pub fn ramp(&self) -> ColorRamp {
        let stops: &'static [ColorStop] = match self {
            ColormapKind::Jet => &ramps::JET,
            ColormapKind::Heat => &ramps::HEAT,
            ColormapKind::Turbo => &ramps::TURBO,
            ColormapKind::Viridis => &ramps::VIRIDIS,
        };
        ColorRamp {
            stops: Cow::Borrowed(stops),
        }
    }
}

impl std::fmt::Display for ColormapKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A named ramp with an optional value domain.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Colormap {
    kind: ColormapKind,
    min: Option<f32>,
    max: Option<f32>,
}

impl Colormap {
    /// A colormap over `kind` with the domain taken from the image.
    pub fn new(kind: ColormapKind) -> Self {
        Self {
            kind,
            min: None,
            max: None,
        }
    }

    /// The jet ramp.
    pub fn jet() -> Self {
        Self::new(ColormapKind::Jet)
    }

    /// The heat ramp.
    pub fn heat() -> Self {
        Self::new(ColormapKind::Heat)
    }

    /// The turbo ramp.
    pub fn turbo() -> Self {
        Self::new(ColormapKind::Turbo)
    }

    /// The viridis ramp.
    pub fn viridis() -> Self {
        Self::new(ColormapKind::Viridis)
    }

    /// Fix the value mapped to the start of the ramp.
    pub fn with_min(mut self, min: f32) -> Self {
        self.min = Some(min);
        self
    }

    /// Fix the value mapped to the end of the ramp.
    pub fn with_max(mut self, max: f32) -> Self {
        self.max = Some(max);
        self
    }

    /// Fix both ends of the domain.
    pub fn with_range(self, min: f32, max: f32) -> Self {
        self.with_min(min).with_max(max)
    }

    /// The ramp of the colormap.
    pub fn kind(&self) -> ColormapKind {
        self.kind
    }

    /// The explicit lower bound, if any.
    pub fn min(&self) -> Option<f32> {
        self.min
    }

    /// The explicit upper bound, if any.
    pub fn max(&self) -> Option<f32> {
        self.max
    }

    /// Resolve the domain for an image, scanning it for unset bounds.
    ///
    /// NaN values are ignored by the scan. Explicit bounds are kept as given,
    /// so with a single explicit bound the scanned one may lie on the wrong
    /// side of it (`min > max`); [`apply_colormap`] then sends every value to
    /// the end of the ramp the explicit bound stands for.
    pub fn domain<T: ImageDtype>(&self, src: &Image<T, 1>) -> Result<(f32, f32), ImgprocError> {
        for bound in [self.min, self.max].into_iter().flatten() {
            if !bound.is_finite() {
                return Err(ImgprocError::InvalidColormapDomain(
                    self.min.unwrap_or(f32::NAN),
                    self.max.unwrap_or(f32::NAN),
                ));
            }
        }

        let (min, max) = match (self.min, self.max) {
            (Some(min), Some(max)) => {
                if min > max {
                    return Err(ImgprocError::InvalidColormapDomain(min, max));
                }
                (min, max)
            }
            (min, max) => {
                let (lo, hi) = scan_range(src);
                (min.unwrap_or(lo), max.unwrap_or(hi))
            }
        };

        Ok((min, max))
    }

    /// Ramp position of `v` within the resolved domain `[min, max]`, unclamped.
    fn position(&self, v: f32, min: f32, max: f32) -> f32 {
        if v.is_nan() {
            return 0.0;
        }
        if max > min {
            return (v - min) / (max - min);
        }
        // empty domain: either truly degenerate or crossed by a scanned bound
        match (self.min, self.max) {
            (Some(lo), None) if v <= lo => 0.0,
            (Some(_), None) => 1.0,
            (None, Some(hi)) if v >= hi => 1.0,
            (None, Some(_)) => 0.0,
            _ => 0.5,
        }
    }
}

/// Minimum and maximum over the finite values of the image.
///
/// An image without finite values yields `(0, 0)`.
fn scan_range<T: ImageDtype>(src: &Image<T, 1>) -> (f32, f32) {
    let (lo, hi) = src
        .as_slice()
        .iter()
        .map(|v| (*v).into())
        .filter(|v: &f32| v.is_finite())
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if lo > hi {
        (0.0, 0.0)
    } else {
        (lo, hi)
    }
}

/// Map a scalar image to RGB through a colormap.
///
/// Each value `v` is normalized to `t = clamp((v - min) / (max - min), 0, 1)`
/// and looked up in the ramp. A degenerate domain (`min == max`) maps every
/// value to the middle of the ramp, and NaN maps to the start of the ramp.
/// When a single explicit bound leaves no room for the scanned values, values
/// at or below an explicit `min` map to the start of the ramp and values at or
/// above an explicit `max` to its end.
///
/// # Arguments
///
/// * `src` - The scalar image.
/// * `colormap` - Ramp and optional domain.
///
/// # Returns
///
/// A new RGB image of the same size.
pub fn apply_colormap<T: ImageDtype>(
    src: &Image<T, 1>,
    colormap: &Colormap,
) -> Result<Image<u8, 3>, ImgprocError> {
    let (min, max) = colormap.domain(src)?;
    let ramp = colormap.kind.ramp();

    log::debug!(
        "apply {} colormap over [{min}, {max}] to {}",
        colormap.kind,
        src.size()
    );

    let mut dst = Image::<u8, 3>::from_size_val(src.size(), 0)?;
    parallel::par_iter_rows(src, &mut dst, |src_pixel, dst_pixel| {
        let t = colormap.position(src_pixel[0].into(), min, max);
        dst_pixel.copy_from_slice(&ramp.color_at(t));
    });

    Ok(dst)
}
