use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use ring_cli::ring_defect::{ChainApproximation, ClassifierConfig};
use ring_cli::{apply_overrides, logger, RingInspector, DEFAULT_BINARIZE_CUTOFF};
use tracing::info;

#[derive(Parser)]
#[command(name = "ringinspect")]
#[command(about = "Classify flash and cut defects on ring-shaped parts from a single image")]
#[command(version)]
struct Cli {
    /// Path to the input image.
    image: PathBuf,

    /// Flash tolerance as a fraction of the outer mean radius.
    #[arg(long)]
    flash_threshold: Option<f64>,

    /// Cut tolerance as a fraction of the outer mean radius.
    #[arg(long)]
    cut_threshold: Option<f64>,

    /// Gray level (0-255) at or below which a pixel belongs to the part.
    #[arg(long, default_value_t = DEFAULT_BINARIZE_CUTOFF)]
    cutoff: u8,

    /// Boundary chain reduction.
    #[arg(long, value_enum)]
    approximation: Option<ApproximationArg>,

    /// Classifier configuration file (.toml or .json). Flags override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the full inspection as JSON.
    #[arg(long)]
    json: bool,

    /// Write an annotated copy of the image to this path.
    #[arg(long)]
    annotate: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ApproximationArg {
    None,
    Simple,
}

impl From<ApproximationArg> for ChainApproximation {
    fn from(arg: ApproximationArg) -> Self {
        match arg {
            ApproximationArg::None => ChainApproximation::None,
            ApproximationArg::Simple => ChainApproximation::Simple,
        }
    }
}

fn main() -> anyhow::Result<()> {
    logger::init();
    let cli = Cli::parse();

    let base = match &cli.config {
        Some(path) => ClassifierConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => ClassifierConfig::new(),
    };
    let config = apply_overrides(
        base,
        cli.flash_threshold,
        cli.cut_threshold,
        cli.approximation.map(Into::into),
    );
    info!("{}", config.summary());

    let inspector = RingInspector::new(config, cli.cutoff)?;
    let inspection = match &cli.annotate {
        Some(out) => inspector.annotate_path(&cli.image, out)?,
        None => inspector.inspect_path(&cli.image)?,
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&inspection)?);
    } else {
        println!("{}: {}", cli.image.display(), inspection.label);
    }

    Ok(())
}
