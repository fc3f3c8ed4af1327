//! Histogram equalization command

use crate::{ColorModel, EqualizeArgs};
use anyhow::Result;
use pxl_ops::{equalize_histogram_hsv, equalize_histogram_rgb};
use tracing::{info, trace};

pub fn run(args: EqualizeArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), model = ?args.model, "equalize::run");

    let image = super::load_image(&args.input)?;
    info!(model = ?args.model, w = image.width(), h = image.height(), "Equalizing histogram");

    if verbose > 0 {
        println!("Equalizing {} ({:?})", args.input.display(), args.model);
    }

    let output = match args.model {
        ColorModel::Rgb => equalize_histogram_rgb(&image),
        ColorModel::Hsv => equalize_histogram_hsv(&image),
    };
    super::save_image(&args.output, &output)?;

    if verbose > 0 {
        println!("Done.");
    }

    Ok(())
}
