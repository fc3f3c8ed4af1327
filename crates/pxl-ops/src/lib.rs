//! # pxl-ops
//!
//! Pixel transforms over [`PixelBuffer`](pxl_core::PixelBuffer)s and the
//! session that drives them.
//!
//! Every transform borrows its input read-only and returns a new buffer of
//! the same dimensions. None of them fail: degenerate inputs (flat luma,
//! all-black images, buffers without an interior) come back unchanged.
//!
//! # Modules
//!
//! - [`filter`] - 3x3 convolution, low-pass filter and kernels
//! - [`contrast`] - Linear contrast stretch over the luma range
//! - [`equalize`] - Histogram equalization in RGB and HSV
//! - [`histogram`] - 256-bin histograms and CDFs
//! - [`composite`] - Side-by-side composition
//! - [`session`] - Original/working buffers and operation dispatch
//! - [`parallel`] - Row-parallel execution helpers
//!
//! # Example
//!
//! ```rust
//! use pxl_core::{PixelBuffer, Rgba};
//! use pxl_ops::{equalize_histogram_rgb, linear_contrast, low_pass_filter};
//!
//! let src = PixelBuffer::filled(8, 8, Rgba::opaque(60, 80, 100)).unwrap();
//!
//! let blurred = low_pass_filter(&src);
//! let stretched = linear_contrast(&blurred);
//! let equalized = equalize_histogram_rgb(&stretched);
//! assert_eq!(equalized.dimensions(), (8, 8));
//! ```
//!
//! # Features
//!
//! - `parallel` (default) - run passes on the rayon pool
//! - `serde` - (de)serialize [`Operation`]

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod composite;
pub mod contrast;
pub mod equalize;
pub mod filter;
pub mod histogram;
pub mod parallel;
pub mod session;

pub use composite::side_by_side;
pub use contrast::{LumaRange, linear_contrast};
pub use equalize::{equalize_histogram_hsv, equalize_histogram_rgb};
pub use error::{OpsError, OpsResult};
pub use filter::{Kernel, convolve3x3, low_pass_filter};
pub use histogram::{Cdf, Histogram};
pub use session::{Operation, Session};
