//! Blur command
//!
//! Applies the 3x3 low-pass filter, or another 3x3 kernel, one or more times.

use crate::{BlurArgs, KernelKind};
use anyhow::{Result, bail};
use pxl_ops::{Kernel, convolve3x3};
use tracing::{info, trace, warn};

pub fn run(args: BlurArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), kernel = ?args.kernel, passes = args.passes, "blur::run");

    let kernel = build_kernel(&args)?;
    if !kernel.is_normalized() {
        warn!(sum = kernel.sum(), "kernel weights do not sum to 1, output will saturate");
    }

    let image = super::load_image(&args.input)?;
    info!(kernel = ?args.kernel, passes = args.passes, w = image.width(), h = image.height(), "Applying blur");

    if verbose > 0 {
        println!(
            "Applying {:?} kernel ({} pass(es)) to {}",
            args.kernel,
            args.passes,
            args.input.display()
        );
    }

    let mut output = image;
    for _ in 0..args.passes {
        output = convolve3x3(&output, &kernel);
    }

    super::save_image(&args.output, &output)?;

    if verbose > 0 {
        println!("Done.");
    }

    Ok(())
}

/// Builds the kernel selected on the command line.
fn build_kernel(args: &BlurArgs) -> Result<Kernel> {
    if args.kernel != KernelKind::Custom && !args.weights.is_empty() {
        bail!("--weights is only used with --kernel custom");
    }
    let kernel = match args.kernel {
        KernelKind::Box => Kernel::box_blur(),
        KernelKind::Gaussian => Kernel::gaussian(args.sigma)?,
        KernelKind::Sharpen => Kernel::sharpen(args.amount)?,
        KernelKind::Custom => Kernel::from_slice(&args.weights)?,
    };
    Ok(kernel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args(kernel: KernelKind, weights: Vec<f64>) -> BlurArgs {
        BlurArgs {
            input: PathBuf::from("in.png"),
            output: PathBuf::from("out.png"),
            kernel,
            sigma: 1.0,
            amount: 1.0,
            weights,
            passes: 1,
        }
    }

    #[test]
    fn test_build_presets() {
        assert_eq!(build_kernel(&args(KernelKind::Box, vec![])).unwrap(), Kernel::box_blur());
        assert!(build_kernel(&args(KernelKind::Gaussian, vec![])).unwrap().is_normalized());
        assert_eq!(
            build_kernel(&args(KernelKind::Sharpen, vec![])).unwrap(),
            Kernel::sharpen(1.0).unwrap()
        );
    }

    #[test]
    fn test_build_custom() {
        let weights = vec![0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0];
        let kernel = build_kernel(&args(KernelKind::Custom, weights)).unwrap();
        assert_eq!(kernel.weights[1][1], 1.0);

        assert!(build_kernel(&args(KernelKind::Custom, vec![1.0; 8])).is_err());
        assert!(build_kernel(&args(KernelKind::Box, vec![1.0; 9])).is_err());
    }

    #[test]
    fn test_build_sharpen_rejects_nan_amount() {
        let mut sharpen = args(KernelKind::Sharpen, vec![]);
        sharpen.amount = f64::NAN;
        let err = build_kernel(&sharpen).unwrap_err();
        assert!(err.to_string().contains("sharpen amount must be finite"));
    }
}
