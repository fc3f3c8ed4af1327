//! Pipeline files for the `run` command.
//!
//! ```yaml
//! steps: [low-pass, low-pass, equalize-hsv]
//! kernel: [0.0625, 0.125, 0.0625, 0.125, 0.25, 0.125, 0.0625, 0.125, 0.0625]
//! side_by_side: true
//! ```

use anyhow::{Context, Result};
use pxl_ops::{Kernel, Operation};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// A sequence of operations plus their settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Operations, applied in order.
    pub steps: Vec<Operation>,
    /// Nine row-major weights for `low-pass`; box blur when absent.
    #[serde(default)]
    pub kernel: Option<Vec<f64>>,
    /// Write original and result side by side instead of the result alone.
    #[serde(default)]
    pub side_by_side: bool,
}

impl PipelineConfig {
    /// Reads and parses a pipeline file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read pipeline: {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid pipeline: {}", path.display()))
    }

    /// Parses pipeline YAML.
    pub fn parse(text: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(text)?;
        config.kernel()?;
        Ok(config)
    }

    /// The low-pass kernel for this pipeline.
    pub fn kernel(&self) -> Result<Kernel> {
        match &self.kernel {
            Some(weights) => Ok(Kernel::from_slice(weights)?),
            None => Ok(Kernel::box_blur()),
        }
    }
}
