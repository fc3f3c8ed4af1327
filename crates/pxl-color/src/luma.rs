//! ITU-R BT.601 luma.
//!
//! `Y' = 0.299*R + 0.587*G + 0.114*B`, computed directly on the 8-bit
//! (gamma-encoded) channel values. No linearization is applied.

use pxl_core::Rgba;
use pxl_core::pixel::saturate_u8;

/// BT.601 luma coefficient for the red channel.
pub const BT601_LUMA_R: f64 = 0.299;

/// BT.601 luma coefficient for the green channel.
pub const BT601_LUMA_G: f64 = 0.587;

/// BT.601 luma coefficient for the blue channel.
pub const BT601_LUMA_B: f64 = 0.114;

/// BT.601 luma coefficients as `[R, G, B]`.
pub const BT601_LUMA: [f64; 3] = [BT601_LUMA_R, BT601_LUMA_G, BT601_LUMA_B];

/// Unrounded luma of an 8-bit RGB triple, in `0.0..=255.0`.
///
/// ```rust
/// use pxl_color::luma_f64;
///
/// assert!((luma_f64(100, 100, 100) - 100.0).abs() < 1e-9);
/// ```
#[inline]
pub fn luma_f64(r: u8, g: u8, b: u8) -> f64 {
    BT601_LUMA_R * r as f64 + BT601_LUMA_G * g as f64 + BT601_LUMA_B * b as f64
}

/// Luma of an 8-bit RGB triple, rounded to the nearest level.
///
/// ```rust
/// use pxl_color::luma;
///
/// assert_eq!(luma(0, 0, 0), 0);
/// assert_eq!(luma(255, 255, 255), 255);
/// assert_eq!(luma(255, 0, 0), 76);
/// ```
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    saturate_u8(luma_f64(r, g, b))
}

/// Luma of a pixel's color channels, ignoring alpha.
#[inline]
pub fn pixel_luma(px: Rgba) -> u8 {
    luma(px.r, px.g, px.b)
}
