//! # pxl-core
//!
//! Core types for the pxl pixel-transform engine.
//!
//! - [`Rgba`] - 8-bit RGBA pixel with named channels
//! - [`PixelBuffer`] - Owned row-major grid of [`Rgba`] pixels
//! - [`Error`] - Bounds and dimension errors
//!
//! ## Crate Structure
//!
//! This crate has no internal dependencies. The other pxl crates build on it:
//!
//! ```text
//! pxl-core (this crate)
//!    ^
//!    |
//!    +-- pxl-color (RGB <-> HSV, luma)
//!    +-- pxl-ops (transforms, session)
//!    +-- pxl-cli (command-line shell)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;
pub mod pixel;

pub use error::{Error, Result};
pub use image::PixelBuffer;
pub use pixel::{OPAQUE, Rgba};

/// Prelude module for convenient imports.
///
/// ```
/// use pxl_core::prelude::*;
///
/// let buf = PixelBuffer::filled(2, 2, Rgba::WHITE).unwrap();
/// assert_eq!(buf.pixel_count(), 4);
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::image::PixelBuffer;
    pub use crate::pixel::{OPAQUE, Rgba, saturate_u8};
}
