//! 3×3 convolution and the low-pass (box blur) filter.
//!
//! # Kernels
//!
//! - [`Kernel::box_blur`] - Uniform average, all weights 1/9 (the default)
//! - [`Kernel::gaussian`] - Normalized Gaussian weights
//! - [`Kernel::sharpen`] - Laplacian-based sharpening
//! - [`Kernel::new`] / [`Kernel::from_slice`] - Any 3×3 matrix
//!
//! # Border policy
//!
//! Only interior pixels (`1 <= x < W-1`, `1 <= y < H-1`) are convolved. The
//! outer one-pixel ring is copied from the source unchanged, so neighbor
//! reads never leave the buffer.
//!
//! # Example
//!
//! ```rust
//! use pxl_core::{PixelBuffer, Rgba};
//! use pxl_ops::filter::low_pass_filter;
//!
//! let src = PixelBuffer::filled(16, 16, Rgba::gray(90)).unwrap();
//! let blurred = low_pass_filter(&src);
//! assert_eq!(blurred, src);
//! ```

use crate::parallel::for_each_row;
use crate::{OpsError, OpsResult};
use pxl_core::pixel::saturate_u8;
use pxl_core::{PixelBuffer, Rgba};
use tracing::{debug, trace};

/// 3×3 convolution kernel.
///
/// Weights are row-major: `weights[row][col]` multiplies the source pixel at
/// `(x + col - 1, y + row - 1)`. They need not sum to one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kernel {
    /// Kernel weights, `[row][col]`.
    pub weights: [[f64; 3]; 3],
}

impl Kernel {
    /// Creates a kernel from a 3×3 weight matrix.
    pub const fn new(weights: [[f64; 3]; 3]) -> Self {
        Self { weights }
    }

    /// Creates a kernel from 9 row-major weights.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::InvalidParameter`] unless `data` holds exactly 9
    /// finite values.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pxl_ops::filter::Kernel;
    ///
    /// let k = Kernel::from_slice(&[0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0]).unwrap();
    /// assert_eq!(k.weights[1][1], 1.0);
    /// assert!(Kernel::from_slice(&[1.0; 4]).is_err());
    /// ```
    pub fn from_slice(data: &[f64]) -> OpsResult<Self> {
        if data.len() != 9 {
            return Err(OpsError::InvalidParameter(format!(
                "kernel needs 9 weights, got {}",
                data.len()
            )));
        }
        if let Some(bad) = data.iter().find(|w| !w.is_finite()) {
            return Err(OpsError::InvalidParameter(format!(
                "kernel weight {bad} is not finite"
            )));
        }
        let mut weights = [[0.0; 3]; 3];
        for (i, w) in data.iter().enumerate() {
            weights[i / 3][i % 3] = *w;
        }
        Ok(Self { weights })
    }

    /// Creates the uniform box blur kernel (all weights 1/9).
    ///
    /// # Example
    ///
    /// ```rust
    /// use pxl_ops::filter::Kernel;
    ///
    /// let k = Kernel::box_blur();
    /// assert!((k.sum() - 1.0).abs() < 1e-12);
    /// ```
    pub const fn box_blur() -> Self {
        const W: f64 = 1.0 / 9.0;
        Self::new([[W; 3]; 3])
    }

    /// Creates a normalized 3×3 Gaussian kernel.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::InvalidParameter`] if `sigma` is not positive.
    pub fn gaussian(sigma: f64) -> OpsResult<Self> {
        if !(sigma > 0.0 && sigma.is_finite()) {
            return Err(OpsError::InvalidParameter(format!(
                "gaussian sigma must be > 0, got {sigma}"
            )));
        }
        let sigma2 = 2.0 * sigma * sigma;
        let mut weights = [[0.0; 3]; 3];
        let mut sum = 0.0;
        for (row, line) in weights.iter_mut().enumerate() {
            for (col, w) in line.iter_mut().enumerate() {
                let dy = row as f64 - 1.0;
                let dx = col as f64 - 1.0;
                *w = (-(dx * dx + dy * dy) / sigma2).exp();
                sum += *w;
            }
        }
        for w in weights.iter_mut().flatten() {
            *w /= sum;
        }
        Ok(Self { weights })
    }

    /// Creates a sharpening kernel.
    ///
    /// `amount` is the sharpening strength (0.5-2.0 typical). The weights
    /// sum to one, so flat regions are preserved.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::InvalidParameter`] if `amount` is not finite.
    pub fn sharpen(amount: f64) -> OpsResult<Self> {
        if !amount.is_finite() {
            return Err(OpsError::InvalidParameter(format!(
                "sharpen amount must be finite, got {amount}"
            )));
        }
        let center = 1.0 + 4.0 * amount;
        Ok(Self::new([
            [0.0, -amount, 0.0],
            [-amount, center, -amount],
            [0.0, -amount, 0.0],
        ]))
    }

    /// Returns the sum of all weights.
    pub fn sum(&self) -> f64 {
        self.weights.iter().flatten().sum()
    }

    /// Returns `true` if the weights sum to one (within 1e-9).
    pub fn is_normalized(&self) -> bool {
        (self.sum() - 1.0).abs() < 1e-9
    }
}

impl Default for Kernel {
    fn default() -> Self {
        Self::box_blur()
    }
}

/// Applies the 3×3 box blur low-pass filter.
///
/// Equivalent to [`convolve3x3`] with [`Kernel::box_blur`].
pub fn low_pass_filter(src: &PixelBuffer) -> PixelBuffer {
    trace!(width = src.width(), height = src.height(), "low_pass_filter");
    convolve3x3(src, &Kernel::box_blur())
}

/// Convolves the interior of `src` with a 3×3 kernel.
///
/// Each RGB channel is convolved independently; the weighted sum is rounded
/// to nearest and saturated to `0..=255`. Convolved pixels get alpha 255.
/// The one-pixel border is copied from `src` unchanged. Every neighbor read
/// comes from `src`, never from the buffer being written.
///
/// Buffers narrower or shorter than 3 pixels have no interior and come back
/// as an exact copy.
///
/// # Example
///
/// ```rust
/// use pxl_core::{PixelBuffer, Rgba};
/// use pxl_ops::filter::{convolve3x3, Kernel};
///
/// let mut src = PixelBuffer::new(3, 3).unwrap();
/// src.set_pixel(1, 1, Rgba::gray(90));
/// let out = convolve3x3(&src, &Kernel::box_blur());
/// assert_eq!(out.pixel(1, 1), Rgba::gray(10));
/// ```
pub fn convolve3x3(src: &PixelBuffer, kernel: &Kernel) -> PixelBuffer {
    let (width, height) = src.dimensions();
    trace!(width, height, kernel_sum = kernel.sum(), "convolve3x3");

    let mut dst = src.clone();
    if width < 3 || height < 3 {
        debug!(width, height, "buffer has no interior, returning copy");
        return dst;
    }

    let w = width as usize;
    for_each_row(&mut dst, |y, row| {
        if y == 0 || y == height - 1 {
            return;
        }
        let window = [src.row(y - 1), src.row(y), src.row(y + 1)];
        for x in 1..w - 1 {
            let mut sums = [0.0f64; 3];
            for (line, weights) in window.iter().zip(kernel.weights.iter()) {
                for (px, kw) in line[x - 1..=x + 1].iter().zip(weights.iter()) {
                    sums[0] += px.r as f64 * kw;
                    sums[1] += px.g as f64 * kw;
                    sums[2] += px.b as f64 * kw;
                }
            }
            row[x] = Rgba::opaque(
                saturate_u8(sums[0]),
                saturate_u8(sums[1]),
                saturate_u8(sums[2]),
            );
        }
    });

    dst
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(width: u32, height: u32) -> PixelBuffer {
        let pixels = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| {
                if (x + y) % 2 == 0 {
                    Rgba::new(255, 0, 90, 17)
                } else {
                    Rgba::new(0, 255, 0, 200)
                }
            })
            .collect();
        PixelBuffer::from_pixels(width, height, pixels).unwrap()
    }

    #[test]
    fn test_kernel_box() {
        let k = Kernel::box_blur();
        for w in k.weights.iter().flatten() {
            assert!((*w - 1.0 / 9.0).abs() < 1e-15);
        }
        assert!(k.is_normalized());
        assert_eq!(Kernel::default(), k);
    }

    #[test]
    fn test_kernel_gaussian() {
        let k = Kernel::gaussian(1.0).unwrap();
        assert!(k.is_normalized());
        // Center should be highest, corners lowest
        assert!(k.weights[1][1] > k.weights[0][1]);
        assert!(k.weights[0][1] > k.weights[0][0]);
        assert!(Kernel::gaussian(0.0).is_err());
        assert!(Kernel::gaussian(f64::NAN).is_err());
    }

    #[test]
    fn test_kernel_sharpen() {
        let k = Kernel::sharpen(1.0).unwrap();
        assert!(k.is_normalized());
        assert_eq!(k.weights[1][1], 5.0);
    }

    #[test]
    fn test_kernel_sharpen_rejects_non_finite() {
        for amount in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = Kernel::sharpen(amount).unwrap_err();
            assert!(matches!(err, OpsError::InvalidParameter(_)));
        }
    }

    #[test]
    fn test_kernel_from_slice_rejects() {
        assert!(Kernel::from_slice(&[1.0; 8]).is_err());
        let mut data = [0.0; 9];
        data[3] = f64::INFINITY;
        assert!(Kernel::from_slice(&data).is_err());
    }

    #[test]
    fn test_kernel_from_slice_row_major() {
        let data: Vec<f64> = (0..9).map(|v| v as f64).collect();
        let k = Kernel::from_slice(&data).unwrap();
        assert_eq!(k.weights[0], [0.0, 1.0, 2.0]);
        assert_eq!(k.weights[2], [6.0, 7.0, 8.0]);
    }

    #[test]
    fn test_uniform_is_fixed_point() {
        let src = PixelBuffer::filled(8, 6, Rgba::opaque(12, 200, 77)).unwrap();
        let result = low_pass_filter(&src);
        assert_eq!(result, src);
    }

    #[test]
    fn test_border_copied_unchanged() {
        let src = checker(7, 5);
        let out = low_pass_filter(&src);
        for x in 0..7 {
            assert_eq!(out.pixel(x, 0), src.pixel(x, 0));
            assert_eq!(out.pixel(x, 4), src.pixel(x, 4));
        }
        for y in 0..5 {
            assert_eq!(out.pixel(0, y), src.pixel(0, y));
            assert_eq!(out.pixel(6, y), src.pixel(6, y));
        }
    }

    #[test]
    fn test_interior_averages_and_is_opaque() {
        let src = checker(5, 5);
        let out = low_pass_filter(&src);
        // (2, 2) is "even": 5 even + 4 odd neighbors in its 3x3 window
        let px = out.pixel(2, 2);
        assert_eq!(px.r, saturate_u8(5.0 * 255.0 / 9.0));
        assert_eq!(px.g, saturate_u8(4.0 * 255.0 / 9.0));
        assert_eq!(px.b, saturate_u8(5.0 * 90.0 / 9.0));
        assert_eq!(px.a, 255);
        // (1, 2) is "odd": 4 even + 5 odd
        let px = out.pixel(1, 2);
        assert_eq!(px.r, saturate_u8(4.0 * 255.0 / 9.0));
        assert_eq!(px.g, saturate_u8(5.0 * 255.0 / 9.0));
    }

    #[test]
    fn test_reads_snapshot_not_output() {
        // A single bright pixel must spread to all 8 neighbors equally; if
        // the filter read its own output the blur would smear unevenly.
        let mut src = PixelBuffer::new(5, 5).unwrap();
        src.set_pixel(2, 2, Rgba::gray(255));
        let out = low_pass_filter(&src);
        for y in 1..4 {
            for x in 1..4 {
                assert_eq!(out.pixel(x, y), Rgba::gray(28), "at ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_small_buffers_copied() {
        for (w, h) in [(1, 1), (2, 5), (5, 2)] {
            let src = checker(w, h);
            assert_eq!(low_pass_filter(&src), src);
        }
    }

    #[test]
    fn test_unnormalized_kernel_saturates() {
        let src = PixelBuffer::filled(3, 3, Rgba::gray(100)).unwrap();
        let doubled = Kernel::new([[2.0 / 9.0; 3]; 3]);
        assert_eq!(convolve3x3(&src, &doubled).pixel(1, 1), Rgba::gray(200));

        let quad = Kernel::new([[4.0 / 9.0; 3]; 3]);
        assert_eq!(convolve3x3(&src, &quad).pixel(1, 1), Rgba::gray(255));

        let negative = Kernel::new([[-1.0; 3]; 3]);
        assert_eq!(convolve3x3(&src, &negative).pixel(1, 1), Rgba::gray(0));
    }

    #[test]
    fn test_kernel_orientation() {
        // Weight only the pixel above the center
        let up = Kernel::new([[0.0, 1.0, 0.0], [0.0, 0.0, 0.0], [0.0, 0.0, 0.0]]);
        let mut src = PixelBuffer::new(3, 3).unwrap();
        src.set_pixel(1, 0, Rgba::gray(77));
        assert_eq!(convolve3x3(&src, &up).pixel(1, 1), Rgba::gray(77));

        let left = Kernel::new([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 0.0]]);
        assert_eq!(convolve3x3(&src, &left).pixel(1, 1), Rgba::gray(0));
    }
}
