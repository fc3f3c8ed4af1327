//! Pipeline command
//!
//! Applies the steps of a YAML pipeline file through a session.

use crate::RunArgs;
use crate::config::PipelineConfig;
use anyhow::{Context, Result};
use pxl_core::PixelBuffer;
use pxl_ops::Session;
use tracing::{info, trace};

pub fn run(args: RunArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), config = %args.config.display(), "pipeline::run");

    let config = PipelineConfig::load(&args.config)?;
    info!(steps = config.steps.len(), side_by_side = config.side_by_side, "Loaded pipeline");

    let image = super::load_image(&args.input)?;
    let output = execute(&config, image, verbose)?;
    super::save_image(&args.output, &output)?;

    if verbose > 0 {
        println!("Done.");
    }

    Ok(())
}

/// Runs every step of `config` on `image` and returns the output buffer.
fn execute(config: &PipelineConfig, image: PixelBuffer, verbose: u8) -> Result<PixelBuffer> {
    let mut session = Session::new().with_kernel(config.kernel()?);
    session.load(image);

    for (i, op) in config.steps.iter().enumerate() {
        info!(step = i + 1, %op, "Applying");
        if verbose > 0 {
            println!("  [{}/{}] {}", i + 1, config.steps.len(), op);
        }
        session.apply(*op);
    }

    let output = if config.side_by_side {
        session.render()
    } else {
        session.working().cloned()
    };
    output.context("Pipeline produced no image")
}
