//! Error types for pxl-core operations.
//!
//! # Overview
//!
//! The [`Error`] enum covers the failure modes of buffer construction and
//! coordinate access:
//! - Coordinate access outside the buffer (the bounds error)
//! - Buffers built from data of the wrong length or with zero area
//! - Copies between buffers of different sizes
//!
//! # Usage
//!
//! ```rust
//! use pxl_core::{Error, Result};
//!
//! fn check(x: u32, y: u32, width: u32, height: u32) -> Result<()> {
//!     if x >= width || y >= height {
//!         return Err(Error::out_of_bounds(x, y, width, height));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check(3, 0, 2, 2).is_err());
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or addressing a [`crate::PixelBuffer`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Pixel coordinates are outside buffer bounds.
    ///
    /// Returned when accessing (x, y) where `x >= width` or `y >= height`.
    /// Transforms never produce this; it signals a caller bug.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pxl_core::Error;
    ///
    /// let err = Error::OutOfBounds { x: 100, y: 50, width: 80, height: 60 };
    /// assert!(err.to_string().contains("100"));
    /// ```
    #[error("pixel ({x}, {y}) out of bounds for buffer {width}x{height}")]
    OutOfBounds {
        /// X coordinate that was out of bounds
        x: u32,
        /// Y coordinate that was out of bounds
        y: u32,
        /// Buffer width
        width: u32,
        /// Buffer height
        height: u32,
    },

    /// Buffer dimensions don't match for the operation.
    #[error("dimension mismatch: {a_width}x{a_height} vs {b_width}x{b_height}")]
    DimensionMismatch {
        /// First buffer width
        a_width: u32,
        /// First buffer height
        a_height: u32,
        /// Second buffer width
        b_width: u32,
        /// Second buffer height
        b_height: u32,
    },

    /// Invalid buffer dimensions.
    ///
    /// Returned when width or height is zero, when the pixel count would
    /// overflow, or when supplied data has the wrong length.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },
}

impl Error {
    /// Creates an [`Error::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self::OutOfBounds {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::DimensionMismatch`] error.
    #[inline]
    pub fn dimension_mismatch(a: (u32, u32), b: (u32, u32)) -> Self {
        Self::DimensionMismatch {
            a_width: a.0,
            a_height: a.1,
            b_width: b.0,
            b_height: b.1,
        }
    }

    /// Returns `true` if this is a bounds error.
    #[inline]
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds() {
        let err = Error::out_of_bounds(100, 50, 80, 60);
        let msg = err.to_string();
        assert!(msg.contains("100"));
        assert!(msg.contains("50"));
        assert!(msg.contains("80x60"));
        assert!(err.is_bounds_error());
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = Error::dimension_mismatch((100, 100), (200, 200));
        let msg = err.to_string();
        assert!(msg.contains("100x100"));
        assert!(msg.contains("200x200"));
        assert!(!err.is_bounds_error());
    }

    #[test]
    fn test_invalid_dimensions_reason() {
        let err = Error::invalid_dimensions(0, 4, "width must be > 0");
        assert!(err.to_string().contains("0x4"));
        assert!(err.to_string().contains("width must be > 0"));
    }
}
