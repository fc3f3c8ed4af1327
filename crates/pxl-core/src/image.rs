//! The owned RGBA pixel grid all transforms operate on.
//!
//! # Memory Layout
//!
//! Pixels are stored in **row-major** order, top-to-bottom:
//!
//! ```text
//! [P(0,0) P(1,0) ... P(W-1,0)]  <- Row 0
//! [P(0,1) P(1,1) ... P(W-1,1)]  <- Row 1
//! ...
//! ```
//!
//! Each `P` is an [`Rgba`]; the storage length is always `width * height`.
//!
//! # Usage
//!
//! ```rust
//! use pxl_core::{PixelBuffer, Rgba};
//!
//! let mut buf = PixelBuffer::new(4, 3).unwrap();
//! buf.set_pixel(1, 2, Rgba::opaque(255, 0, 0));
//! assert_eq!(buf.pixel(1, 2).r, 255);
//!
//! // Bounds-checked access
//! assert!(buf.try_pixel(4, 0).is_err());
//! ```
//!
//! # Ownership
//!
//! A buffer has exactly one owner. `Clone` is a deep copy; there is no shared
//! storage, so a transform reading `&PixelBuffer` while writing a different
//! `PixelBuffer` can never observe its own writes.

use crate::{Error, Result, Rgba};

/// Owned 2D grid of RGBA pixels.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Row-major pixel storage, `width * height` entries
    pixels: Vec<Rgba>,
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
}

/// Validates dimensions and returns the pixel count.
fn checked_len(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::invalid_dimensions(
            width,
            height,
            "width and height must be > 0",
        ));
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| Error::invalid_dimensions(width, height, "pixel count overflows"))
}

impl PixelBuffer {
    /// Creates a buffer filled with opaque black.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if either dimension is zero.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pxl_core::PixelBuffer;
    ///
    /// let buf = PixelBuffer::new(640, 480).unwrap();
    /// assert_eq!(buf.dimensions(), (640, 480));
    /// assert!(PixelBuffer::new(0, 10).is_err());
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::filled(width, height, Rgba::BLACK)
    }

    /// Creates a buffer with every pixel set to `pixel`.
    pub fn filled(width: u32, height: u32, pixel: Rgba) -> Result<Self> {
        let len = checked_len(width, height)?;
        Ok(Self {
            pixels: vec![pixel; len],
            width,
            height,
        })
    }

    /// Creates a buffer from row-major pixels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `pixels.len() != width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgba>) -> Result<Self> {
        let expected = checked_len(width, height)?;
        if pixels.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} pixels, got {}", expected, pixels.len()),
            ));
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Creates a buffer from interleaved RGBA8 bytes, as produced by a decoder.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pxl_core::PixelBuffer;
    ///
    /// let bytes = [255, 0, 0, 255, 0, 255, 0, 255];
    /// let buf = PixelBuffer::from_rgba_bytes(2, 1, &bytes).unwrap();
    /// assert_eq!(buf.pixel(1, 0).g, 255);
    /// ```
    pub fn from_rgba_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        let expected = checked_len(width, height)?;
        if bytes.len() != expected * 4 {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} bytes, got {}", expected * 4, bytes.len()),
            ));
        }
        let pixels = bytes
            .chunks_exact(4)
            .map(|c| Rgba::new(c[0], c[1], c[2], c[3]))
            .collect();
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Returns the buffer width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the buffer height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    /// Returns the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics with the [`Error::OutOfBounds`] message if (x, y) is outside
    /// the buffer. Use [`try_pixel`](Self::try_pixel) for a checked variant.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        match self.try_pixel(x, y) {
            Ok(px) => px,
            Err(e) => panic!("{e}"),
        }
    }

    /// Returns the pixel at (x, y), or [`Error::OutOfBounds`].
    #[inline]
    pub fn try_pixel(&self, x: u32, y: u32) -> Result<Rgba> {
        if self.contains(x, y) {
            Ok(self.pixels[self.index(x, y)])
        } else {
            Err(Error::out_of_bounds(x, y, self.width, self.height))
        }
    }

    /// Sets the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics with the [`Error::OutOfBounds`] message if (x, y) is outside
    /// the buffer.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: Rgba) {
        if let Err(e) = self.try_set_pixel(x, y, pixel) {
            panic!("{e}");
        }
    }

    /// Sets the pixel at (x, y), or returns [`Error::OutOfBounds`].
    #[inline]
    pub fn try_set_pixel(&mut self, x: u32, y: u32, pixel: Rgba) -> Result<()> {
        if !self.contains(x, y) {
            return Err(Error::out_of_bounds(x, y, self.width, self.height));
        }
        let idx = self.index(x, y);
        self.pixels[idx] = pixel;
        Ok(())
    }

    /// Fills the entire buffer with a pixel value.
    pub fn fill(&mut self, pixel: Rgba) {
        self.pixels.fill(pixel);
    }

    /// Overwrites this buffer with the contents of `src`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the sizes differ.
    pub fn copy_from(&mut self, src: &PixelBuffer) -> Result<()> {
        self.ensure_same_size(src)?;
        self.pixels.copy_from_slice(&src.pixels);
        Ok(())
    }

    /// Returns an error unless `other` has the same dimensions.
    pub fn ensure_same_size(&self, other: &PixelBuffer) -> Result<()> {
        if self.dimensions() != other.dimensions() {
            return Err(Error::dimension_mismatch(
                self.dimensions(),
                other.dimensions(),
            ));
        }
        Ok(())
    }

    /// Returns row `y` as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[Rgba] {
        assert!(y < self.height, "row {y} out of bounds for height {}", self.height);
        let start = y as usize * self.width as usize;
        &self.pixels[start..start + self.width as usize]
    }

    /// Returns row `y` as a mutable slice.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [Rgba] {
        assert!(y < self.height, "row {y} out of bounds for height {}", self.height);
        let start = y as usize * self.width as usize;
        let end = start + self.width as usize;
        &mut self.pixels[start..end]
    }

    /// Returns all pixels in row-major order.
    #[inline]
    pub fn as_pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Returns all pixels mutably in row-major order.
    #[inline]
    pub fn as_pixels_mut(&mut self) -> &mut [Rgba] {
        &mut self.pixels
    }

    /// Iterates over all pixels with their coordinates.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pxl_core::{PixelBuffer, Rgba};
    ///
    /// let buf = PixelBuffer::filled(3, 2, Rgba::WHITE).unwrap();
    /// assert_eq!(buf.pixels().count(), 6);
    /// for (_x, _y, px) in buf.pixels() {
    ///     assert_eq!(px, Rgba::WHITE);
    /// }
    /// ```
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32, Rgba)> + '_ {
        let w = self.width as usize;
        self.pixels
            .iter()
            .enumerate()
            .map(move |(i, px)| ((i % w) as u32, (i / w) as u32, *px))
    }

    /// Calls `f` for every pixel in row-major order.
    pub fn for_each_pixel<F>(&self, mut f: F)
    where
        F: FnMut(u32, u32, Rgba),
    {
        for (x, y, px) in self.pixels() {
            f(x, y, px);
        }
    }

    /// Applies a function to each pixel in place.
    ///
    /// ```rust
    /// use pxl_core::{PixelBuffer, Rgba};
    ///
    /// let mut buf = PixelBuffer::filled(2, 2, Rgba::gray(100)).unwrap();
    /// buf.map_pixels(|px| px.map_rgb(|c| c / 2));
    /// assert_eq!(buf.pixel(1, 1), Rgba::gray(50));
    /// ```
    pub fn map_pixels<F>(&mut self, f: F)
    where
        F: Fn(Rgba) -> Rgba,
    {
        for px in &mut self.pixels {
            *px = f(*px);
        }
    }

    /// Iterates over raw channel values `R G B A R G B A ...`.
    pub fn channels(&self) -> impl Iterator<Item = u8> + '_ {
        self.pixels.iter().flat_map(|px| px.to_array())
    }

    /// Returns the buffer as interleaved RGBA8 bytes, as an encoder expects.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.channels().collect()
    }
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_new() {
        let buf = PixelBuffer::new(100, 50).unwrap();
        assert_eq!(buf.width(), 100);
        assert_eq!(buf.height(), 50);
        assert_eq!(buf.pixel_count(), 5000);
        assert_eq!(buf.pixel(99, 49), Rgba::BLACK);
    }

    #[test]
    fn test_buffer_zero_area_rejected() {
        assert!(matches!(
            PixelBuffer::new(0, 5),
            Err(Error::InvalidDimensions { .. })
        ));
        assert!(PixelBuffer::new(5, 0).is_err());
    }

    #[test]
    fn test_buffer_set_get_pixel() {
        let mut buf = PixelBuffer::new(10, 10).unwrap();
        buf.set_pixel(5, 6, Rgba::opaque(1, 2, 3));
        assert_eq!(buf.pixel(5, 6), Rgba::opaque(1, 2, 3));
        assert_eq!(buf.pixel(6, 5), Rgba::BLACK);
    }

    #[test]
    fn test_try_pixel_out_of_bounds() {
        let mut buf = PixelBuffer::new(4, 4).unwrap();
        let err = buf.try_pixel(4, 0).unwrap_err();
        assert!(err.is_bounds_error());
        assert!(buf.try_set_pixel(0, 4, Rgba::WHITE).is_err());
        assert!(buf.try_set_pixel(3, 3, Rgba::WHITE).is_ok());
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_pixel_out_of_bounds_panics() {
        let buf = PixelBuffer::new(2, 2).unwrap();
        let _ = buf.pixel(2, 0);
    }

    #[test]
    fn test_from_rgba_bytes() {
        let bytes: Vec<u8> = (0..2 * 2 * 4).map(|v| v as u8).collect();
        let buf = PixelBuffer::from_rgba_bytes(2, 2, &bytes).unwrap();
        assert_eq!(buf.pixel(1, 0), Rgba::new(4, 5, 6, 7));
        assert_eq!(buf.pixel(0, 1), Rgba::new(8, 9, 10, 11));
        assert_eq!(buf.to_rgba_bytes(), bytes);
    }

    #[test]
    fn test_from_rgba_bytes_wrong_size() {
        let result = PixelBuffer::from_rgba_bytes(2, 2, &[0u8; 15]);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_pixels_wrong_size() {
        let result = PixelBuffer::from_pixels(3, 3, vec![Rgba::BLACK; 8]);
        assert!(result.is_err());
    }

    #[test]
    fn test_clone_is_deep() {
        let a = PixelBuffer::filled(3, 3, Rgba::WHITE).unwrap();
        let mut b = a.clone();
        b.set_pixel(0, 0, Rgba::BLACK);
        assert_eq!(a.pixel(0, 0), Rgba::WHITE);
        assert_eq!(b.pixel(0, 0), Rgba::BLACK);
    }

    #[test]
    fn test_copy_from_checks_size() {
        let src = PixelBuffer::filled(3, 3, Rgba::WHITE).unwrap();
        let mut dst = PixelBuffer::new(3, 3).unwrap();
        dst.copy_from(&src).unwrap();
        assert_eq!(dst, src);

        let mut other = PixelBuffer::new(2, 3).unwrap();
        assert!(matches!(
            other.copy_from(&src),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_rows() {
        let mut buf = PixelBuffer::new(4, 2).unwrap();
        buf.row_mut(1).fill(Rgba::WHITE);
        assert_eq!(buf.row(0).len(), 4);
        assert!(buf.row(1).iter().all(|&px| px == Rgba::WHITE));
        assert_eq!(buf.pixel(3, 1), Rgba::WHITE);
    }

    #[test]
    fn test_pixels_coordinates() {
        let mut buf = PixelBuffer::new(3, 2).unwrap();
        buf.set_pixel(2, 1, Rgba::WHITE);
        let found: Vec<_> = buf
            .pixels()
            .filter(|(_, _, px)| *px == Rgba::WHITE)
            .map(|(x, y, _)| (x, y))
            .collect();
        assert_eq!(found, vec![(2, 1)]);

        let mut visited = 0;
        buf.for_each_pixel(|_, _, _| visited += 1);
        assert_eq!(visited, 6);
    }

    #[test]
    fn test_channels_iteration() {
        let buf = PixelBuffer::filled(2, 1, Rgba::new(1, 2, 3, 4)).unwrap();
        let raw: Vec<u8> = buf.channels().collect();
        assert_eq!(raw, vec![1, 2, 3, 4, 1, 2, 3, 4]);
    }
}
