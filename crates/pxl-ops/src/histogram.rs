//! 256-bin intensity histograms and their cumulative distributions.
//!
//! A [`Histogram`] counts pixels per 8-bit level of some scalar channel
//! (luma for RGB equalization, HSV value for HSV equalization). Its [`Cdf`]
//! produces the equalization level map.
//!
//! # Example
//!
//! ```rust
//! use pxl_core::{PixelBuffer, Rgba};
//! use pxl_ops::histogram::Histogram;
//!
//! let buf = PixelBuffer::from_pixels(2, 1, vec![Rgba::gray(0), Rgba::gray(255)]).unwrap();
//! let hist = Histogram::from_luma(&buf);
//! assert_eq!(hist.count(0), 1);
//! assert_eq!(hist.count(255), 1);
//!
//! let map = hist.cdf().equalization_map().unwrap();
//! assert_eq!((map[0], map[255]), (0, 255));
//! ```

use crate::parallel::count_levels;
use pxl_color::{pixel_luma, pixel_to_hsv};
use pxl_core::pixel::saturate_u8;
use pxl_core::{PixelBuffer, Rgba};

/// Number of intensity levels (and histogram bins).
pub const LEVELS: usize = 256;

/// Pixel counts per 8-bit intensity level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: [u64; LEVELS],
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

impl Histogram {
    /// Creates an empty histogram.
    pub const fn new() -> Self {
        Self {
            counts: [0; LEVELS],
        }
    }

    /// Creates a histogram from raw counts.
    pub const fn from_counts(counts: [u64; LEVELS]) -> Self {
        Self { counts }
    }

    /// Counts `level(px)` over every pixel of `src`.
    pub fn from_levels<F>(src: &PixelBuffer, level: F) -> Self
    where
        F: Fn(Rgba) -> u8 + Send + Sync,
    {
        Self {
            counts: count_levels(src, level),
        }
    }

    /// Histogram of rounded BT.601 luma.
    pub fn from_luma(src: &PixelBuffer) -> Self {
        Self::from_levels(src, pixel_luma)
    }

    /// Histogram of HSV value, bucket `round(v * 255)`.
    pub fn from_value(src: &PixelBuffer) -> Self {
        Self::from_levels(src, |px| pixel_to_hsv(px).value_level())
    }

    /// Adds one sample at `level`.
    #[inline]
    pub fn add(&mut self, level: u8) {
        self.counts[level as usize] += 1;
    }

    /// Returns the count at `level`.
    #[inline]
    pub fn count(&self, level: u8) -> u64 {
        self.counts[level as usize]
    }

    /// Returns all bins.
    #[inline]
    pub fn counts(&self) -> &[u64; LEVELS] {
        &self.counts
    }

    /// Returns the total number of samples.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Lowest non-empty level, or `None` for an empty histogram.
    pub fn min_level(&self) -> Option<u8> {
        self.counts.iter().position(|&c| c > 0).map(|l| l as u8)
    }

    /// Highest non-empty level, or `None` for an empty histogram.
    pub fn max_level(&self) -> Option<u8> {
        self.counts.iter().rposition(|&c| c > 0).map(|l| l as u8)
    }

    /// Number of non-empty levels.
    pub fn occupied_levels(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Returns the largest bin count.
    pub fn peak(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Computes the cumulative distribution.
    pub fn cdf(&self) -> Cdf {
        let mut values = [0u64; LEVELS];
        let mut running = 0u64;
        for (v, c) in values.iter_mut().zip(self.counts.iter()) {
            running += c;
            *v = running;
        }
        Cdf { values }
    }
}

/// Cumulative distribution of a [`Histogram`]: `values[i] = sum(counts[0..=i])`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cdf {
    values: [u64; LEVELS],
}

impl Cdf {
    /// Returns the cumulative count at `level`.
    #[inline]
    pub fn get(&self, level: u8) -> u64 {
        self.values[level as usize]
    }

    /// Returns all cumulative counts.
    #[inline]
    pub fn values(&self) -> &[u64; LEVELS] {
        &self.values
    }

    /// Returns the total sample count (`values[255]`).
    #[inline]
    pub fn total(&self) -> u64 {
        self.values[LEVELS - 1]
    }

    /// Builds the equalization level map.
    ///
    /// `map[l] = round((cdf[l] - cdf[0]) / (total - cdf[0]) * 255)`.
    ///
    /// Returns `None` when `total == cdf[0]`, i.e. every sample sits at
    /// level 0 (or there are none) and the mapping is undefined. Callers
    /// treat that as the identity.
    pub fn equalization_map(&self) -> Option<[u8; LEVELS]> {
        let base = self.values[0];
        let total = self.total();
        if total == base {
            return None;
        }
        let denom = (total - base) as f64;
        Some(std::array::from_fn(|l| {
            saturate_u8((self.values[l] - base) as f64 / denom * 255.0)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let hist = Histogram::new();
        assert_eq!(hist.total(), 0);
        assert_eq!(hist.min_level(), None);
        assert_eq!(hist.max_level(), None);
        assert_eq!(hist.peak(), 0);
        assert!(hist.cdf().equalization_map().is_none());
    }

    #[test]
    fn test_from_luma_counts_every_pixel() {
        let pixels = vec![
            Rgba::gray(10),
            Rgba::gray(10),
            Rgba::opaque(255, 0, 0),
            Rgba::gray(200),
        ];
        let buf = PixelBuffer::from_pixels(2, 2, pixels).unwrap();
        let hist = Histogram::from_luma(&buf);
        assert_eq!(hist.total(), 4);
        assert_eq!(hist.count(10), 2);
        assert_eq!(hist.count(76), 1);
        assert_eq!(hist.count(200), 1);
        assert_eq!(hist.min_level(), Some(10));
        assert_eq!(hist.max_level(), Some(200));
        assert_eq!(hist.occupied_levels(), 3);
        assert_eq!(hist.peak(), 2);
    }

    #[test]
    fn test_from_value_uses_channel_max() {
        let buf = PixelBuffer::from_pixels(2, 1, vec![Rgba::opaque(10, 120, 30), Rgba::opaque(0, 0, 250)]).unwrap();
        let hist = Histogram::from_value(&buf);
        assert_eq!(hist.count(120), 1);
        assert_eq!(hist.count(250), 1);
    }

    #[test]
    fn test_cdf_accumulates() {
        let mut hist = Histogram::new();
        hist.add(0);
        hist.add(3);
        hist.add(3);
        hist.add(255);
        let cdf = hist.cdf();
        assert_eq!(cdf.get(0), 1);
        assert_eq!(cdf.get(2), 1);
        assert_eq!(cdf.get(3), 3);
        assert_eq!(cdf.get(254), 3);
        assert_eq!(cdf.total(), 4);
        assert!(cdf.values().windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_equalization_map_two_levels() {
        let mut counts = [0u64; LEVELS];
        counts[0] = 2;
        counts[255] = 2;
        let map = Histogram::from_counts(counts).cdf().equalization_map().unwrap();
        assert_eq!(map[0], 0);
        assert_eq!(map[255], 255);
    }

    #[test]
    fn test_equalization_map_spreads_narrow_range() {
        let mut counts = [0u64; LEVELS];
        counts[100] = 1;
        counts[101] = 1;
        counts[102] = 1;
        counts[103] = 1;
        let map = Histogram::from_counts(counts).cdf().equalization_map().unwrap();
        // cdf[0] = 0, so level l maps to cdf[l] / 4 * 255
        assert_eq!(map[100], 64);
        assert_eq!(map[101], 128);
        assert_eq!(map[102], 191);
        assert_eq!(map[103], 255);
        assert!(map.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_equalization_map_degenerate() {
        let mut counts = [0u64; LEVELS];
        counts[0] = 9;
        assert!(Histogram::from_counts(counts).cdf().equalization_map().is_none());
    }
}
