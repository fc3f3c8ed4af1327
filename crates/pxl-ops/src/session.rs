//! Editing session: an original image, its working copy and the transform
//! dispatcher.
//!
//! A [`Session`] owns two buffers of identical dimensions. The original is
//! fixed at load time; every [`Operation`] derives a new working buffer from
//! the current one, and [`Operation::Reset`] copies the original back.
//!
//! # Example
//!
//! ```rust
//! use pxl_core::{PixelBuffer, Rgba};
//! use pxl_ops::session::{Operation, Session};
//!
//! let mut session = Session::new();
//! assert!(session.apply(Operation::LowPass).is_none());
//!
//! session.load(PixelBuffer::filled(4, 4, Rgba::gray(90)).unwrap());
//! let working = session.apply(Operation::LinearContrast).unwrap();
//! assert_eq!(working.dimensions(), (4, 4));
//!
//! session.apply(Operation::Reset);
//! assert_eq!(session.working(), session.original());
//! ```

use crate::composite::side_by_side;
use crate::contrast::linear_contrast;
use crate::equalize::{equalize_histogram_hsv, equalize_histogram_rgb};
use crate::filter::{Kernel, convolve3x3};
use crate::{OpsError, OpsResult};
use pxl_core::PixelBuffer;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace, warn};

/// A transform the session can apply to its working buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Operation {
    /// Replace the working buffer with a copy of the original.
    Reset,
    /// 3x3 convolution with the session kernel (box blur by default).
    #[cfg_attr(feature = "serde", serde(alias = "lowpass", alias = "blur"))]
    LowPass,
    /// Stretch the luma range to `0..=255`.
    #[cfg_attr(feature = "serde", serde(alias = "contrast"))]
    LinearContrast,
    /// Equalize luma, grayscale output.
    EqualizeRgb,
    /// Equalize HSV value, hue and saturation kept.
    EqualizeHsv,
}

impl Operation {
    /// All operations, in menu order.
    pub const ALL: [Self; 5] = [
        Self::Reset,
        Self::LowPass,
        Self::LinearContrast,
        Self::EqualizeRgb,
        Self::EqualizeHsv,
    ];

    /// Kebab-case name, as accepted by [`FromStr`] and pipeline files.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Reset => "reset",
            Self::LowPass => "low-pass",
            Self::LinearContrast => "linear-contrast",
            Self::EqualizeRgb => "equalize-rgb",
            Self::EqualizeHsv => "equalize-hsv",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = OpsError;

    fn from_str(s: &str) -> OpsResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reset" => Ok(Self::Reset),
            "low-pass" | "lowpass" | "blur" => Ok(Self::LowPass),
            "linear-contrast" | "contrast" => Ok(Self::LinearContrast),
            "equalize-rgb" => Ok(Self::EqualizeRgb),
            "equalize-hsv" => Ok(Self::EqualizeHsv),
            other => Err(OpsError::InvalidParameter(format!(
                "unknown operation '{other}', expected one of: {}",
                Self::ALL.map(Self::name).join(", ")
            ))),
        }
    }
}

/// Original and working buffers, always the same size.
#[derive(Debug, Clone)]
struct Images {
    original: PixelBuffer,
    working: PixelBuffer,
}

/// An editing session over one loaded image.
#[derive(Debug, Clone, Default)]
pub struct Session {
    images: Option<Images>,
    kernel: Kernel,
}

impl Session {
    /// Creates an empty session with the box-blur kernel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the kernel used by [`Operation::LowPass`].
    pub fn with_kernel(mut self, kernel: Kernel) -> Self {
        self.kernel = kernel;
        self
    }

    /// Returns the low-pass kernel.
    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    /// Replaces the low-pass kernel.
    pub fn set_kernel(&mut self, kernel: Kernel) {
        self.kernel = kernel;
    }

    /// Loads a new image. Both original and working buffers are replaced.
    pub fn load(&mut self, image: PixelBuffer) {
        debug!(width = image.width(), height = image.height(), "loading image");
        self.images = Some(Images {
            working: image.clone(),
            original: image,
        });
    }

    /// Returns `true` once an image has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.images.is_some()
    }

    /// The image as loaded.
    pub fn original(&self) -> Option<&PixelBuffer> {
        self.images.as_ref().map(|i| &i.original)
    }

    /// The current working buffer.
    pub fn working(&self) -> Option<&PixelBuffer> {
        self.images.as_ref().map(|i| &i.working)
    }

    /// Copies the original back into the working buffer.
    pub fn reset(&mut self) {
        self.apply(Operation::Reset);
    }

    /// Applies `op` to the working buffer and returns the new working buffer.
    ///
    /// Returns `None` without doing anything if no image is loaded.
    pub fn apply(&mut self, op: Operation) -> Option<&PixelBuffer> {
        let Some(images) = self.images.as_mut() else {
            warn!(%op, "no image loaded, ignoring operation");
            return None;
        };
        trace!(%op, "apply");

        let working = &images.working;
        images.working = match op {
            Operation::Reset => images.original.clone(),
            Operation::LowPass => convolve3x3(working, &self.kernel),
            Operation::LinearContrast => linear_contrast(working),
            Operation::EqualizeRgb => equalize_histogram_rgb(working),
            Operation::EqualizeHsv => equalize_histogram_hsv(working),
        };
        Some(&images.working)
    }

    /// Renders original and working buffers side by side.
    ///
    /// Returns `None` if no image is loaded.
    pub fn render(&self) -> Option<PixelBuffer> {
        let images = self.images.as_ref()?;
        // Both buffers share dimensions, so composition cannot mismatch.
        match side_by_side(&images.original, &images.working) {
            Ok(buf) => Some(buf),
            Err(err) => {
                warn!(%err, "render failed");
                None
            }
        }
    }
}
