use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use rmp_core::io::image_io::{load_raster, save_raster};
use rmp_core::pipeline::{output_title, process_stack, ProgressReporter, RmpConfig, SliceSelection};
use tracing::info;

use super::{OperatorArg, ShapeArg};
use crate::summary::print_run_summary;

#[derive(Args)]
pub struct RunArgs {
    /// Input images, processed as the slices of one stack
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Operator config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Operator to apply
    #[arg(long, value_enum)]
    pub operator: Option<OperatorArg>,

    /// Structuring element shape
    #[arg(long, value_enum)]
    pub shape: Option<ShapeArg>,

    /// Structuring element size (odd, 3-99)
    #[arg(long)]
    pub size: Option<u32>,

    /// Number of orientations over a half turn
    #[arg(long)]
    pub iterations: Option<u32>,

    /// Worker threads (0 = all cores)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Slices to process: "all", a range like "2-5", or a list like "1,3"
    #[arg(long, default_value = "all")]
    pub slices: String,

    /// Directory for results (defaults to each input's directory)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

/// Drives a progress bar from operator progress events.
struct BarReporter {
    bar: ProgressBar,
}

impl ProgressReporter for BarReporter {
    fn begin_slice(&self, index: usize, total: usize) {
        self.bar.set_message(format!("Slice {index}/{total}"));
        self.bar.set_position(0);
    }

    fn report(&self, completed: usize, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_position(completed as u64);
    }
}

pub fn run(args: &RunArgs) -> Result<()> {
    let config = build_config(args)?;
    config.validate().context("Invalid operator parameters")?;

    let slices = args
        .files
        .iter()
        .map(|path| {
            let raster = load_raster(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            info!(
                path = %path.display(),
                width = raster.width(),
                height = raster.height(),
                bit_depth = %raster.bit_depth,
                "Loaded slice"
            );
            Ok(raster)
        })
        .collect::<Result<Vec<_>>>()?;
    let selection = SliceSelection::parse(&args.slices, slices.len())?;

    print_run_summary(&config, &args.files, &selection);

    let bar = ProgressBar::new(1);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{msg:20} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    let reporter = BarReporter { bar };

    let results = process_stack(&slices, &selection, &config, &reporter)?;
    reporter.bar.finish_with_message("Done");
    println!();

    for result in &results {
        let input = &args.files[result.index - 1];
        let output = output_path(input, args.output_dir.as_deref(), &config)?;
        save_raster(&result.raster, &output)
            .with_context(|| format!("Failed to save {}", output.display()))?;
        info!(slice = result.index, path = %output.display(), "Saved result");
        println!("Output saved to {}", output.display());
    }

    Ok(())
}

fn build_config(args: &RunArgs) -> Result<RmpConfig> {
    let mut config = if let Some(ref config_path) = args.config {
        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config {}", config_path.display()))?;
        toml::from_str(&contents).context("Invalid operator config")?
    } else {
        RmpConfig::default()
    };

    if let Some(op) = args.operator {
        config.operator = op.into();
    }
    if let Some(shape) = args.shape {
        config.shape = shape.into();
    }
    if let Some(size) = args.size {
        config.se_size = size;
    }
    if let Some(iterations) = args.iterations {
        config.iterations = iterations;
    }
    if let Some(threads) = args.threads {
        config.threads = threads;
    }
    Ok(config)
}

/// `<dir>/<stem>-<tags>.<ext>`, keeping the input's extension. Dots inside
/// the stem are kept.
fn output_path(input: &Path, output_dir: Option<&Path>, config: &RmpConfig) -> Result<PathBuf> {
    let Some(stem) = input.file_stem().and_then(|s| s.to_str()) else {
        bail!("Cannot derive an output name from {}", input.display());
    };
    let dir = output_dir
        .map(Path::to_path_buf)
        .or_else(|| input.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    let title = output_title(stem, config);
    let name = match input.extension() {
        Some(ext) => format!("{title}.{}", ext.to_string_lossy()),
        None => title,
    };
    Ok(dir.join(name))
}
