//! Linear contrast stretch.
//!
//! Finds the darkest and brightest rounded luma in the buffer and rescales
//! every color channel so that range maps onto `0..=255`:
//!
//! ```text
//! out = (c - min) * 255 / (max - min)
//! ```
//!
//! The same luma offsets are applied to R, G and B, so channels below the
//! luma minimum (or above the maximum) saturate.

use crate::histogram::Histogram;
use crate::parallel::map_pixels;
use pxl_core::PixelBuffer;
use pxl_core::pixel::saturate_u8;
use tracing::{debug, trace};

/// Range of rounded luma values in a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LumaRange {
    /// Darkest luma.
    pub min: u8,
    /// Brightest luma.
    pub max: u8,
}

impl LumaRange {
    /// Scans `src` for its luma extremes.
    ///
    /// ```rust
    /// use pxl_core::{PixelBuffer, Rgba};
    /// use pxl_ops::contrast::LumaRange;
    ///
    /// let buf = PixelBuffer::from_pixels(2, 1, vec![Rgba::gray(40), Rgba::gray(90)]).unwrap();
    /// assert_eq!(LumaRange::of(&buf), LumaRange { min: 40, max: 90 });
    /// ```
    pub fn of(src: &PixelBuffer) -> Self {
        Self::from_histogram(&Histogram::from_luma(src))
    }

    /// Extracts the range from a luma histogram. An empty histogram gives `0..=0`.
    pub fn from_histogram(hist: &Histogram) -> Self {
        Self {
            min: hist.min_level().unwrap_or(0),
            max: hist.max_level().unwrap_or(0),
        }
    }

    /// Returns `max - min`.
    #[inline]
    pub fn span(&self) -> u8 {
        self.max - self.min
    }

    /// Returns `true` if every pixel has the same luma.
    #[inline]
    pub fn is_flat(&self) -> bool {
        self.min == self.max
    }
}

/// Stretches the buffer's luma range to the full `0..=255` range.
///
/// Each color channel becomes `round((c - min) * 255 / (max - min))`,
/// saturated to `0..=255`; alpha becomes 255.
///
/// A flat buffer (`min == max`) has no range to stretch and is returned
/// unchanged.
///
/// # Example
///
/// ```rust
/// use pxl_core::{PixelBuffer, Rgba};
/// use pxl_ops::contrast::linear_contrast;
///
/// let src = PixelBuffer::from_pixels(2, 1, vec![Rgba::gray(100), Rgba::gray(150)]).unwrap();
/// let out = linear_contrast(&src);
/// assert_eq!(out.pixel(0, 0), Rgba::gray(0));
/// assert_eq!(out.pixel(1, 0), Rgba::gray(255));
/// ```
pub fn linear_contrast(src: &PixelBuffer) -> PixelBuffer {
    trace!(width = src.width(), height = src.height(), "linear_contrast");

    let range = LumaRange::of(src);
    debug!(min = range.min, max = range.max, "luma range");

    if range.is_flat() {
        debug!(level = range.min, "flat luma range, leaving buffer unchanged");
        return src.clone();
    }

    let min = range.min as f64;
    let scale = 255.0 / range.span() as f64;
    map_pixels(src, |px| {
        px.map_rgb(|c| saturate_u8((c as f64 - min) * scale))
    })
}
