//! Image info command.
//!
//! Displays dimensions and luma statistics, optionally with a histogram.

use crate::InfoArgs;
use anyhow::{Context, Result};
use pxl_core::PixelBuffer;
use pxl_ops::{Histogram, LumaRange};
use std::fs;
use tracing::trace;

/// Bins per histogram row when printing.
const BIN_GROUP: usize = 16;
/// Width of the longest histogram bar.
const BAR_WIDTH: u64 = 48;

/// Runs the info command.
pub fn run(args: InfoArgs, verbose: u8) -> Result<()> {
    for path in &args.input {
        trace!(input = %path.display(), "info::run");
        let file_size = fs::metadata(path)
            .with_context(|| format!("Failed to stat: {}", path.display()))?
            .len();
        let image = super::load_image(path)?;
        let hist = Histogram::from_luma(&image);

        println!("{}", path.display());
        print_summary(&image, &hist, file_size, verbose);
        if args.histogram {
            print_histogram(&hist);
        }

        if args.input.len() > 1 {
            println!();
        }
    }

    Ok(())
}

/// Mean level of a histogram.
fn mean_level(hist: &Histogram) -> f64 {
    let total = hist.total();
    if total == 0 {
        return 0.0;
    }
    let weighted: u64 = hist
        .counts()
        .iter()
        .enumerate()
        .map(|(level, &count)| level as u64 * count)
        .sum();
    weighted as f64 / total as f64
}

fn print_summary(image: &PixelBuffer, hist: &Histogram, file_size: u64, verbose: u8) {
    let range = LumaRange::from_histogram(hist);
    println!("  Resolution: {}x{}", image.width(), image.height());
    println!("  Pixels:     {}", image.pixel_count());
    println!("  File size:  {}", format_size(file_size));
    println!("  Luma range: {}..{}", range.min, range.max);
    println!("  Luma mean:  {:.2}", mean_level(hist));
    println!("  Levels:     {} of 256 used", hist.occupied_levels());

    if verbose > 0 {
        let opaque = image.as_pixels().iter().filter(|px| px.a == 255).count();
        println!("  Opaque:     {} pixels", opaque);
        println!("  Flat range: {}", range.is_flat());
    }
}

/// Prints 16 rows of 16 summed bins as text bars.
fn print_histogram(hist: &Histogram) {
    let groups: Vec<u64> = hist
        .counts()
        .chunks(BIN_GROUP)
        .map(|chunk| chunk.iter().sum())
        .collect();
    let peak = groups.iter().copied().max().unwrap_or(0).max(1);

    println!("  Histogram (luma):");
    for (i, &count) in groups.iter().enumerate() {
        let lo = i * BIN_GROUP;
        let hi = lo + BIN_GROUP - 1;
        let bar = "#".repeat((count * BAR_WIDTH / peak) as usize);
        println!("    {lo:>3}-{hi:<3} {count:>9} {bar}");
    }
}

/// Format file size for display
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
