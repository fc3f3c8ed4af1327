//! The 8-bit RGBA pixel type.
//!
//! Every buffer in pxl stores [`Rgba`] values: four `u8` channels with named
//! fields, so transforms never compute channel offsets by hand.
//!
//! ```
//! use pxl_core::Rgba;
//!
//! let px = Rgba::opaque(255, 128, 64);
//! assert_eq!(px.a, 255);
//! assert_eq!(px.to_array(), [255, 128, 64, 255]);
//! ```
//!
//! # Memory Layout
//!
//! `Rgba` is `#[repr(C)]`, so a `[Rgba]` slice has the same layout as the
//! interleaved `[R G B A R G B A ...]` byte stream a decoder produces.

use std::fmt;

/// Fully opaque alpha value. All transforms write this into their output.
pub const OPAQUE: u8 = 255;

/// An 8-bit-per-channel RGBA pixel.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel
    pub a: u8,
}

impl Rgba {
    /// Opaque black.
    pub const BLACK: Self = Self::opaque(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::opaque(255, 255, 255);

    /// Creates a pixel from all four channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque pixel (alpha = 255).
    #[inline]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, OPAQUE)
    }

    /// Creates an opaque gray pixel with all color channels equal to `level`.
    #[inline]
    pub const fn gray(level: u8) -> Self {
        Self::opaque(level, level, level)
    }

    /// Returns the color channels as `[r, g, b]`.
    #[inline]
    pub const fn rgb(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Returns all four channels as `[r, g, b, a]`.
    #[inline]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Returns a copy with alpha forced to 255.
    #[inline]
    pub const fn with_opaque_alpha(self) -> Self {
        Self::opaque(self.r, self.g, self.b)
    }

    /// Applies `f` to each color channel, forcing alpha to 255.
    #[inline]
    pub fn map_rgb<F: Fn(u8) -> u8>(self, f: F) -> Self {
        Self::opaque(f(self.r), f(self.g), f(self.b))
    }
}

impl From<[u8; 4]> for Rgba {
    #[inline]
    fn from(c: [u8; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

impl From<[u8; 3]> for Rgba {
    #[inline]
    fn from(c: [u8; 3]) -> Self {
        Self::opaque(c[0], c[1], c[2])
    }
}

impl From<Rgba> for [u8; 4] {
    #[inline]
    fn from(px: Rgba) -> Self {
        px.to_array()
    }
}

impl fmt::Debug for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Rounds a real channel value to the nearest integer and saturates to `0..=255`.
///
/// Halves round away from zero. NaN maps to 0.
///
/// ```
/// use pxl_core::pixel::saturate_u8;
///
/// assert_eq!(saturate_u8(127.5), 128);
/// assert_eq!(saturate_u8(-3.0), 0);
/// assert_eq!(saturate_u8(300.2), 255);
/// ```
#[inline]
pub fn saturate_u8(value: f64) -> u8 {
    // `as` saturates floats and maps NaN to 0.
    value.round() as u8
}
