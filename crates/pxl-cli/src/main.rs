//! pxl - pixel-transform CLI
//!
//! Loads a PNG, runs it through the pxl transforms and writes the result.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use pxl_ops::Operation;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "pxl")]
#[command(author, version, about = "Pixel-transform engine CLI")]
#[command(long_about = "
Applies low-pass filtering, linear contrast and histogram equalization to
8-bit RGBA images.

Examples:
  pxl info photo.png                        # Dimensions and luma statistics
  pxl info photo.png --histogram            # Plus a luma histogram
  pxl blur photo.png -o soft.png            # 3x3 box blur
  pxl blur photo.png -o soft.png -k gaussian --sigma 0.8 -n 3
  pxl blur photo.png -o out.png -k custom -w 0,-1,0,-1,5,-1,0,-1,0
  pxl contrast photo.png -o stretched.png
  pxl equalize photo.png -o eq.png -m hsv
  pxl compare photo.png -o cmp.png -s low-pass -s equalize-rgb
  pxl run photo.png -c pipeline.yaml -o out.png
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Display image dimensions and luma statistics
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Apply a 3x3 low-pass (or custom) convolution
    Blur(BlurArgs),

    /// Stretch the luma range to 0..255
    Contrast(ContrastArgs),

    /// Equalize the histogram in RGB or HSV
    #[command(visible_alias = "eq")]
    Equalize(EqualizeArgs),

    /// Apply operations and write original and result side by side
    #[command(visible_alias = "cmp")]
    Compare(CompareArgs),

    /// Run a YAML pipeline
    Run(RunArgs),
}

#[derive(Args)]
struct InfoArgs {
    /// Input image(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Print the luma histogram
    #[arg(long)]
    histogram: bool,
}

/// Kernel presets for the `blur` command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum KernelKind {
    /// Uniform 1/9 weights
    Box,
    /// Normalized Gaussian, see --sigma
    Gaussian,
    /// Laplacian sharpen, see --amount
    Sharpen,
    /// Nine weights from --weights
    Custom,
}

#[derive(Args)]
struct BlurArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Kernel preset
    #[arg(short, long, value_enum, default_value = "box")]
    kernel: KernelKind,

    /// Gaussian sigma
    #[arg(long, default_value = "1.0")]
    sigma: f64,

    /// Sharpen strength
    #[arg(long, default_value = "1.0")]
    amount: f64,

    /// Nine row-major weights for the custom kernel
    #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true)]
    weights: Vec<f64>,

    /// Number of passes
    #[arg(short = 'n', long, default_value = "1")]
    passes: u32,
}

#[derive(Args)]
struct ContrastArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,
}

/// Color model for the `equalize` command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ColorModel {
    /// Equalize luma, grayscale output
    Rgb,
    /// Equalize HSV value, colors kept
    Hsv,
}

#[derive(Args)]
struct EqualizeArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Color model
    #[arg(short, long, value_enum, default_value = "rgb")]
    model: ColorModel,
}

#[derive(Args)]
struct CompareArgs {
    /// Input image
    input: PathBuf,

    /// Output image (twice the input width)
    #[arg(short, long)]
    output: PathBuf,

    /// Operation to apply, repeatable: reset, low-pass, linear-contrast,
    /// equalize-rgb, equalize-hsv
    #[arg(short, long = "step", required = true)]
    steps: Vec<Operation>,
}

#[derive(Args)]
struct RunArgs {
    /// Input image
    input: PathBuf,

    /// Pipeline file (YAML)
    #[arg(short, long)]
    config: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,
}

/// Installs the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level follows `-v`.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish()
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Info(args) => commands::info::run(args, cli.verbose),
        Commands::Blur(args) => commands::blur::run(args, cli.verbose),
        Commands::Contrast(args) => commands::contrast::run(args, cli.verbose),
        Commands::Equalize(args) => commands::equalize::run(args, cli.verbose),
        Commands::Compare(args) => commands::compare::run(args, cli.verbose),
        Commands::Run(args) => commands::pipeline::run(args, cli.verbose),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_blur_custom_weights() {
        let cli = Cli::parse_from([
            "pxl", "blur", "in.png", "-o", "out.png", "-k", "custom", "-w", "0,-1,0,-1,5,-1,0,-1,0",
        ]);
        let Commands::Blur(args) = cli.command else {
            panic!("expected blur");
        };
        assert_eq!(args.kernel, KernelKind::Custom);
        assert_eq!(args.weights, vec![0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0]);
        assert_eq!(args.passes, 1);
    }

    #[test]
    fn test_parse_compare_steps() {
        let cli = Cli::parse_from([
            "pxl", "-vv", "compare", "in.png", "-o", "cmp.png", "-s", "blur", "-s", "equalize-hsv",
        ]);
        assert_eq!(cli.verbose, 2);
        let Commands::Compare(args) = cli.command else {
            panic!("expected compare");
        };
        assert_eq!(args.steps, vec![Operation::LowPass, Operation::EqualizeHsv]);
    }

    #[test]
    fn test_parse_rejects_unknown_step() {
        let res = Cli::try_parse_from(["pxl", "compare", "in.png", "-o", "x.png", "-s", "posterize"]);
        assert!(res.is_err());
    }
}
