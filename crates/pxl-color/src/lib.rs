//! # pxl-color
//!
//! Color model conversions used by the pxl transforms.
//!
//! - [`rgb_to_hsv`] / [`hsv_to_rgb`] - 8-bit RGB <-> normalized HSV
//! - [`luma`] - BT.601 luma, the brightness channel for RGB-space histograms
//!
//! All functions are pure and allocation-free.
//!
//! # Quick Start
//!
//! ```rust
//! use pxl_color::{hsv_to_rgb, luma, rgb_to_hsv};
//!
//! let hsv = rgb_to_hsv(200, 120, 40);
//! let back = hsv_to_rgb(hsv.h, hsv.s, hsv.v);
//! assert_eq!(back, [200, 120, 40]);
//!
//! assert_eq!(luma(200, 120, 40), 135);
//! ```
//!
//! # Dependencies
//!
//! - [`pxl_core`] - [`Rgba`](pxl_core::Rgba) pixel type and rounding helpers

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod hsv;
pub mod luma;

pub use hsv::{Hsv, hsv_to_rgb, pixel_to_hsv, rgb_to_hsv};
pub use luma::{BT601_LUMA, luma, luma_f64, pixel_luma};
