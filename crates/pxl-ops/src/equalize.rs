//! Histogram equalization in RGB (luma) and HSV (value) space.
//!
//! Both variants build a 256-bin histogram of a brightness channel, turn its
//! CDF into a level map (see [`Cdf::equalization_map`]) and push every pixel
//! through that map:
//!
//! - [`equalize_histogram_rgb`] equalizes luma and writes the result into
//!   R, G and B alike. The output is grayscale.
//! - [`equalize_histogram_hsv`] equalizes HSV value and keeps hue and
//!   saturation, so colors survive.
//!
//! # Value scale
//!
//! HSV value stays in `0.0..=1.0` everywhere. Only the histogram bucket is
//! an 8-bit level: the mapped level is divided by 255 before converting back
//! to RGB.
//!
//! [`Cdf::equalization_map`]: crate::histogram::Cdf::equalization_map

use crate::histogram::Histogram;
use crate::parallel::map_pixels;
use pxl_color::{pixel_luma, pixel_to_hsv};
use pxl_core::{PixelBuffer, Rgba};
use tracing::{debug, trace};

/// Equalizes the luma histogram and writes it to all color channels.
///
/// Each pixel becomes gray at `map[luma]`, alpha 255. If every pixel has
/// luma 0 the map is undefined and the buffer is returned unchanged.
///
/// # Example
///
/// ```rust
/// use pxl_core::{PixelBuffer, Rgba};
/// use pxl_ops::equalize::equalize_histogram_rgb;
///
/// let src = PixelBuffer::from_pixels(2, 1, vec![Rgba::gray(0), Rgba::opaque(200, 10, 10)]).unwrap();
/// let out = equalize_histogram_rgb(&src);
/// assert_eq!(out.pixel(0, 0), Rgba::gray(0));
/// assert_eq!(out.pixel(1, 0), Rgba::gray(255));
/// ```
pub fn equalize_histogram_rgb(src: &PixelBuffer) -> PixelBuffer {
    trace!(width = src.width(), height = src.height(), "equalize_histogram_rgb");

    let hist = Histogram::from_luma(src);
    let Some(map) = hist.cdf().equalization_map() else {
        debug!("every pixel has luma 0, leaving buffer unchanged");
        return src.clone();
    };
    debug!(occupied = hist.occupied_levels(), "luma histogram");

    map_pixels(src, |px| Rgba::gray(map[pixel_luma(px) as usize]))
}

/// Equalizes the HSV value histogram, preserving hue and saturation.
///
/// Each pixel's value becomes `map[round(v * 255)] / 255`; the result is
/// converted back to RGB with alpha 255. If every pixel is black the map is
/// undefined and the buffer is returned unchanged.
///
/// # Example
///
/// ```rust
/// use pxl_core::{PixelBuffer, Rgba};
/// use pxl_ops::equalize::equalize_histogram_hsv;
///
/// let src = PixelBuffer::from_pixels(2, 1, vec![Rgba::gray(0), Rgba::opaque(0, 0, 100)]).unwrap();
/// let out = equalize_histogram_hsv(&src);
/// assert_eq!(out.pixel(0, 0), Rgba::gray(0));
/// assert_eq!(out.pixel(1, 0), Rgba::opaque(0, 0, 255));
/// ```
pub fn equalize_histogram_hsv(src: &PixelBuffer) -> PixelBuffer {
    trace!(width = src.width(), height = src.height(), "equalize_histogram_hsv");

    let hist = Histogram::from_value(src);
    let Some(map) = hist.cdf().equalization_map() else {
        debug!("every pixel has value 0, leaving buffer unchanged");
        return src.clone();
    };
    debug!(occupied = hist.occupied_levels(), "value histogram");

    map_pixels(src, |px| {
        let hsv = pixel_to_hsv(px);
        let level = map[hsv.value_level() as usize];
        hsv.with_value(level as f64 / 255.0).to_rgba()
    })
}
