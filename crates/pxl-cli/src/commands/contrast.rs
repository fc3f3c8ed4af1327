//! Linear contrast command

use crate::ContrastArgs;
use anyhow::Result;
use pxl_ops::{LumaRange, linear_contrast};
use tracing::{info, trace};

pub fn run(args: ContrastArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), "contrast::run");

    let image = super::load_image(&args.input)?;
    let range = LumaRange::of(&image);
    info!(min = range.min, max = range.max, "Stretching luma range");

    if verbose > 0 {
        println!(
            "Stretching luma {}..{} of {} to 0..255",
            range.min,
            range.max,
            args.input.display()
        );
    }

    let output = linear_contrast(&image);
    super::save_image(&args.output, &output)?;

    if verbose > 0 {
        println!("Done.");
    }

    Ok(())
}
