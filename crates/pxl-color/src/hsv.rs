//! RGB <-> HSV conversion for 8-bit pixels.
//!
//! Hue, saturation and value are all normalized to `0.0..=1.0`:
//! - `h` - hue as a fraction of the full turn (0.0 = red, 1/3 = green, 2/3 = blue)
//! - `s` - saturation, `(max - min) / max`, 0.0 for black
//! - `v` - value, `max / 255`
//!
//! The 8-bit round trip is lossy: [`hsv_to_rgb`] rounds each channel, so
//! `hsv_to_rgb(rgb_to_hsv(c))` is within ±1 of `c`, not always equal.
//!
//! ```rust
//! use pxl_color::{hsv_to_rgb, rgb_to_hsv};
//!
//! let hsv = rgb_to_hsv(255, 0, 0);
//! assert_eq!(hsv.h, 0.0);
//! assert_eq!(hsv.s, 1.0);
//! assert_eq!(hsv.v, 1.0);
//! assert_eq!(hsv_to_rgb(hsv.h, hsv.s, hsv.v), [255, 0, 0]);
//! ```

use pxl_core::Rgba;
use pxl_core::pixel::saturate_u8;

/// A color in the HSV model, every component in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsv {
    /// Hue, fraction of a full turn
    pub h: f64,
    /// Saturation
    pub s: f64,
    /// Value (brightness)
    pub v: f64,
}

impl Hsv {
    /// Creates an HSV color.
    #[inline]
    pub const fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }

    /// Returns V as an 8-bit level, `round(v * 255)`.
    ///
    /// This is the histogram bucket used by value equalization.
    #[inline]
    pub fn value_level(&self) -> u8 {
        saturate_u8(self.v * 255.0)
    }

    /// Returns a copy with V replaced.
    #[inline]
    pub fn with_value(self, v: f64) -> Self {
        Self { v, ..self }
    }

    /// Converts back to an opaque 8-bit pixel.
    #[inline]
    pub fn to_rgba(self) -> Rgba {
        Rgba::from(hsv_to_rgb(self.h, self.s, self.v))
    }
}

/// Converts 8-bit RGB to HSV.
///
/// When several channels share the maximum, the hue formula is chosen by
/// checking R first, then G, then B. Achromatic input (max == min) has
/// hue 0; black has saturation 0.
///
/// ```rust
/// use pxl_color::rgb_to_hsv;
///
/// let gray = rgb_to_hsv(128, 128, 128);
/// assert_eq!(gray.h, 0.0);
/// assert_eq!(gray.s, 0.0);
///
/// let green = rgb_to_hsv(0, 255, 0);
/// assert!((green.h - 1.0 / 3.0).abs() < 1e-12);
/// ```
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> Hsv {
    let r = r as f64 / 255.0;
    let g = g as f64 / 255.0;
    let b = b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let d = max - min;

    let s = if max == 0.0 { 0.0 } else { d / max };

    let h = if max == min {
        0.0
    } else {
        let sector = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };
        sector / 6.0
    };

    Hsv { h, s, v: max }
}

/// Converts HSV to 8-bit RGB, rounding each channel to nearest.
///
/// The sector index is `floor(h * 6) mod 6`, so `h = 1.0` wraps to red.
///
/// ```rust
/// use pxl_color::hsv_to_rgb;
///
/// assert_eq!(hsv_to_rgb(0.0, 0.0, 0.5), [128, 128, 128]);
/// assert_eq!(hsv_to_rgb(1.0, 1.0, 1.0), [255, 0, 0]);
/// assert_eq!(hsv_to_rgb(2.0 / 3.0, 1.0, 1.0), [0, 0, 255]);
/// ```
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> [u8; 3] {
    let scaled = h * 6.0;
    let i = scaled.floor();
    let f = scaled - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    let (r, g, b) = match (i as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    [
        saturate_u8(r * 255.0),
        saturate_u8(g * 255.0),
        saturate_u8(b * 255.0),
    ]
}

/// Converts a pixel's color channels to HSV, ignoring alpha.
#[inline]
pub fn pixel_to_hsv(px: Rgba) -> Hsv {
    rgb_to_hsv(px.r, px.g, px.b)
}
