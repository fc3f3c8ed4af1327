//! Compare command
//!
//! Runs operations through a session and writes the original next to the
//! result.

use crate::CompareArgs;
use anyhow::{Context, Result};
use pxl_ops::Session;
use tracing::{info, trace};

pub fn run(args: CompareArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), steps = args.steps.len(), "compare::run");

    let mut session = Session::new();
    session.load(super::load_image(&args.input)?);

    for op in &args.steps {
        info!(%op, "Applying");
        if verbose > 0 {
            println!("  {}", op);
        }
        session.apply(*op);
    }

    let composite = session.render().context("Nothing to render")?;
    super::save_image(&args.output, &composite)?;

    if verbose > 0 {
        println!(
            "Wrote {}x{} comparison to {}",
            composite.width(),
            composite.height(),
            args.output.display()
        );
    }

    Ok(())
}
