//! Side-by-side composition of two buffers.
//!
//! Used to present an original image next to its transformed working copy:
//! the left buffer lands at offset (0, 0), the right one at (W, 0).
//!
//! # Example
//!
//! ```rust
//! use pxl_core::{PixelBuffer, Rgba};
//! use pxl_ops::composite::side_by_side;
//!
//! let left = PixelBuffer::filled(2, 2, Rgba::gray(0)).unwrap();
//! let right = PixelBuffer::filled(2, 2, Rgba::gray(255)).unwrap();
//!
//! let both = side_by_side(&left, &right).unwrap();
//! assert_eq!(both.dimensions(), (4, 2));
//! assert_eq!(both.pixel(1, 1), Rgba::gray(0));
//! assert_eq!(both.pixel(2, 1), Rgba::gray(255));
//! ```

use crate::parallel::for_each_row;
use crate::{OpsError, OpsResult};
use pxl_core::PixelBuffer;
use tracing::trace;

/// Places `left` and `right` next to each other in a `2W x H` buffer.
///
/// Both inputs must have the same dimensions. Pixels are copied verbatim,
/// alpha included.
///
/// # Errors
///
/// - [`OpsError::SizeMismatch`] if the dimensions differ
/// - [`OpsError::InvalidParameter`] if `2W` overflows
pub fn side_by_side(left: &PixelBuffer, right: &PixelBuffer) -> OpsResult<PixelBuffer> {
    trace!(
        left = ?left.dimensions(),
        right = ?right.dimensions(),
        "side_by_side"
    );

    if left.dimensions() != right.dimensions() {
        return Err(OpsError::SizeMismatch(format!(
            "left is {}x{}, right is {}x{}",
            left.width(),
            left.height(),
            right.width(),
            right.height()
        )));
    }

    let (width, height) = left.dimensions();
    let out_width = width
        .checked_mul(2)
        .ok_or_else(|| OpsError::InvalidParameter(format!("composite width 2 * {width} overflows")))?;

    let mut dst = PixelBuffer::new(out_width, height)?;
    let w = width as usize;
    for_each_row(&mut dst, |y, row| {
        row[..w].copy_from_slice(left.row(y));
        row[w..].copy_from_slice(right.row(y));
    });

    Ok(dst)
}
