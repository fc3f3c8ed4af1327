//! Row-parallel dispatch for pixel passes.
//!
//! With the `parallel` feature (default) rows are processed on the rayon
//! pool; without it the same closures run sequentially. Every pass writes
//! only its own output row and reads only immutable inputs, so both paths
//! produce bit-identical buffers.
//!
//! # Example
//!
//! ```rust
//! use pxl_core::{PixelBuffer, Rgba};
//! use pxl_ops::parallel;
//!
//! let src = PixelBuffer::filled(64, 64, Rgba::gray(10)).unwrap();
//! let doubled = parallel::map_pixels(&src, |px| px.map_rgb(|c| c * 2));
//! assert_eq!(doubled.pixel(63, 63), Rgba::gray(20));
//! ```

use pxl_core::{PixelBuffer, Rgba};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Calls `f(y, row)` for every row of `dst`.
///
/// Runs on the rayon pool when the `parallel` feature is enabled.
pub fn for_each_row<F>(dst: &mut PixelBuffer, f: F)
where
    F: Fn(u32, &mut [Rgba]) + Send + Sync,
{
    #[cfg(feature = "parallel")]
    {
        let width = dst.width() as usize;
        dst.as_pixels_mut()
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| f(y as u32, row));
    }

    #[cfg(not(feature = "parallel"))]
    for_each_row_sequential(dst, f);
}

/// Sequential reference for [`for_each_row`]: rows top to bottom.
pub fn for_each_row_sequential<F>(dst: &mut PixelBuffer, f: F)
where
    F: Fn(u32, &mut [Rgba]),
{
    let width = dst.width() as usize;
    dst.as_pixels_mut()
        .chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| f(y as u32, row));
}

/// Returns a new buffer with `f` applied to every pixel of `src`.
///
/// `src` is never modified; the result has the same dimensions.
pub fn map_pixels<F>(src: &PixelBuffer, f: F) -> PixelBuffer
where
    F: Fn(Rgba) -> Rgba + Send + Sync,
{
    let mut dst = src.clone();
    for_each_row(&mut dst, |_, row| {
        for px in row.iter_mut() {
            *px = f(*px);
        }
    });
    dst
}

/// Counts `level(px)` over every pixel of `src` into 256 bins.
///
/// Rows are counted independently and summed; integer addition makes the
/// result independent of the visiting order.
pub fn count_levels<F>(src: &PixelBuffer, level: F) -> [u64; 256]
where
    F: Fn(Rgba) -> u8 + Send + Sync,
{
    let width = src.width() as usize;
    let count_row = |mut acc: [u64; 256], row: &[Rgba]| {
        for px in row {
            acc[level(*px) as usize] += 1;
        }
        acc
    };

    #[cfg(feature = "parallel")]
    let counts = src
        .as_pixels()
        .par_chunks(width)
        .fold(|| [0u64; 256], count_row)
        .reduce(|| [0u64; 256], merge_counts);

    #[cfg(not(feature = "parallel"))]
    let counts = src
        .as_pixels()
        .chunks(width)
        .fold([0u64; 256], count_row);

    counts
}

#[cfg(feature = "parallel")]
fn merge_counts(mut a: [u64; 256], b: [u64; 256]) -> [u64; 256] {
    for (x, y) in a.iter_mut().zip(b.iter()) {
        *x += *y;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> PixelBuffer {
        let pixels = (0..width * height)
            .map(|i| Rgba::opaque((i % 256) as u8, (i * 7 % 256) as u8, (i * 13 % 256) as u8))
            .collect();
        PixelBuffer::from_pixels(width, height, pixels).unwrap()
    }

    #[test]
    fn test_for_each_row_matches_sequential() {
        let src = gradient(37, 23);
        let op = |y: u32, row: &mut [Rgba]| {
            for (x, px) in row.iter_mut().enumerate() {
                *px = Rgba::opaque(px.r ^ (y as u8), px.g.wrapping_add(x as u8), px.b);
            }
        };

        let mut par = src.clone();
        for_each_row(&mut par, op);
        let mut seq = src.clone();
        for_each_row_sequential(&mut seq, op);

        assert_eq!(par, seq);
    }

    #[test]
    fn test_map_pixels_leaves_source() {
        let src = gradient(8, 8);
        let inverted = map_pixels(&src, |px| px.map_rgb(|c| 255 - c));
        assert_eq!(inverted.dimensions(), src.dimensions());
        assert_eq!(inverted.pixel(3, 4).r, 255 - src.pixel(3, 4).r);
        assert_eq!(src, gradient(8, 8));
    }

    #[test]
    fn test_count_levels_total() {
        let src = gradient(100, 30);
        let counts = count_levels(&src, |px| px.r);
        assert_eq!(counts.iter().sum::<u64>(), 3000);

        let expected = src.as_pixels().iter().filter(|px| px.r == 5).count() as u64;
        assert_eq!(counts[5], expected);
    }
}
