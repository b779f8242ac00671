//! oklch - OKLCH picker core on the command line
//!
//! Parses and converts color codes and paints the picker's gamut charts,
//! slider strips and 3D model points.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use oklch_color::OutputFormat;
use oklch_core::Axis;
use oklch_paint::ModelGamut;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "oklch")]
#[command(author, version, about = "OKLCH color picker core")]
#[command(long_about = "
Parses CSS colors, converts them between notations and paints the gamut
charts of an OKLCH picker.

Examples:
  oklch parse '#ff6b00'                       # Value, gamut and fragment
  oklch convert 'lab(60 40 -20)' --all        # Every output notation
  oklch convert tomato -f hex/rgba
  oklch chart --axis h --value 150 -o h.png   # Fixed-hue chart
  oklch chart --color '#0af' -o charts.png    # All three charts
  oklch range --axis c --color 'oklch(0.7 0.1 30)' -o c.png
  oklch model --gamut p3 -o p3.csv
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,

    /// Picker configuration (RON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the picker value of a color code
    #[command(visible_alias = "p")]
    Parse(ParseArgs),

    /// Print a color in one or all output notations
    #[command(visible_alias = "c")]
    Convert(ConvertArgs),

    /// Paint 2D gamut charts to PNG
    Chart(ChartArgs),

    /// Paint a slider strip to PNG and print its stops
    Range(RangeArgs),

    /// Export the 3D model point cloud of a gamut
    Model(ModelArgs),
}

/// Arguments for the `parse` command.
#[derive(Args)]
struct ParseArgs {
    /// Any CSS color, hex code or `#l,c,h,a` fragment
    code: String,
}

/// Arguments for the `convert` command.
#[derive(Args)]
struct ConvertArgs {
    /// Any CSS color, hex code or `#l,c,h,a` fragment
    code: String,

    /// Output notation: figmaP3, hex, hex/rgba, hsl, lab, lch, lrgb, numbers, oklab, p3, rgb
    #[arg(short, long, conflicts_with = "all")]
    format: Option<OutputFormat>,

    /// Print every notation
    #[arg(short, long)]
    all: bool,
}

/// Display options shared by the painting commands.
#[derive(Args)]
struct DisplayArgs {
    /// Show the P3 gamut (default from config)
    #[arg(long)]
    p3: Option<bool>,

    /// Show the Rec2020 gamut (default from config)
    #[arg(long)]
    rec2020: Option<bool>,

    /// Encode pixels for a Display P3 screen
    #[arg(long)]
    display_p3: bool,
}

/// Arguments for the `chart` command.
#[derive(Args)]
struct ChartArgs {
    /// Fixed axis: l, c or h (all three when omitted)
    #[arg(short = 'a', long)]
    axis: Option<Axis>,

    /// Value of the fixed axis (overrides the color)
    #[arg(long, requires = "axis")]
    value: Option<f64>,

    /// Color supplying the fixed values (default from config)
    #[arg(long)]
    color: Option<String>,

    /// Chart width in pixels
    #[arg(short, long, default_value = "340")]
    width: u32,

    /// Chart height in pixels
    #[arg(short = 'H', long, default_value = "150")]
    height: u32,

    #[command(flatten)]
    display: DisplayArgs,

    /// Chart workers (0 = threads or config)
    #[arg(long, default_value = "0")]
    workers: usize,

    /// Output PNG; with all three charts the axis is added to the name
    #[arg(short, long)]
    output: PathBuf,
}

/// Arguments for the `range` command.
#[derive(Args)]
struct RangeArgs {
    /// Slider axis: l, c or h
    #[arg(short = 'a', long)]
    axis: Axis,

    /// Color supplying the other components (default from config)
    #[arg(long)]
    color: Option<String>,

    /// Strip width in pixels
    #[arg(short, long, default_value = "340")]
    width: u32,

    /// Strip height in pixels
    #[arg(short = 'H', long, default_value = "30")]
    height: u32,

    #[command(flatten)]
    display: DisplayArgs,

    /// Output PNG
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Arguments for the `model` command.
#[derive(Args)]
struct ModelArgs {
    /// Gamut: srgb, p3 or rec2020
    #[arg(short, long, default_value = "srgb")]
    gamut: ModelGamut,

    /// Output CSV (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Installs the log subscriber. `RUST_LOG` overrides `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
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

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Parse(args) => commands::parse::run(args, &config),
        Commands::Convert(args) => commands::convert::run(args, &config),
        Commands::Chart(args) => commands::chart::run(args, &config, cli.threads),
        Commands::Range(args) => commands::range::run(args, &config),
        Commands::Model(args) => commands::model::run(args),
    }
}
