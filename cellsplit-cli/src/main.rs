//! cellsplit command-line interface.
//!
//! Detects the grid of a photographed table, writes one crop per cell and
//! optionally hands the crops to an external symbol classifier.
#![allow(
    clippy::uninlined_format_args,
    clippy::redundant_closure_for_method_calls,
    clippy::too_many_lines
)]

use cellsplit_core::{ContourMode, RowPolicy, SplitConfig};
use cellsplit_io::manifest::write_json_file;
use cellsplit_io::{classify_cells, load_image, merge_table, CommandClassifier, Pipeline};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;

/// Result type for CLI operations.
type Result<T> = std::result::Result<T, CliError>;

/// CLI error types.
#[derive(Error, Debug)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    CellsplitIo(#[from] cellsplit_io::Error),

    #[error("Core error: {0}")]
    Core(#[from] cellsplit_core::Error),

    #[error("Invalid config file {}: {source}", .path.display())]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Row assignment policy selection.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum RowPolicyArg {
    /// Join the earliest row within tolerance
    FirstMatch,
    /// Join the closest row within tolerance
    NearestCenter,
}

impl From<RowPolicyArg> for RowPolicy {
    fn from(arg: RowPolicyArg) -> Self {
        match arg {
            RowPolicyArg::FirstMatch => RowPolicy::FirstMatch,
            RowPolicyArg::NearestCenter => RowPolicy::NearestCenter,
        }
    }
}

/// Contour selection on the grid mask.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ContourModeArg {
    /// Outer borders of top-level components
    External,
    /// One region per enclosed cell
    CellInteriors,
}

impl From<ContourModeArg> for ContourMode {
    fn from(arg: ContourModeArg) -> Self {
        match arg {
            ContourModeArg::External => ContourMode::External,
            ContourModeArg::CellInteriors => ContourMode::CellInteriors,
        }
    }
}

/// Table grid detection and cell segmentation.
#[derive(Parser)]
#[command(name = "cellsplit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect cells and print the recovered rows
    Detect {
        #[command(flatten)]
        split: SplitArgs,
    },

    /// Split an image into one crop per cell
    Split {
        #[command(flatten)]
        split: SplitArgs,

        /// Output directory (cleared before writing)
        #[arg(short, long)]
        output: PathBuf,

        /// Write the cell list as JSON to this file
        #[arg(long)]
        manifest: Option<PathBuf>,
    },

    /// Split, classify every crop and write the merged table
    Run {
        #[command(flatten)]
        split: SplitArgs,

        /// Output directory (cleared before writing)
        #[arg(short, long)]
        output: PathBuf,

        /// Classifier program; receives the crop path as last argument
        #[arg(long)]
        classifier: PathBuf,

        /// Extra argument passed to the classifier before the crop path
        #[arg(long = "classifier-arg", allow_hyphen_values = true)]
        classifier_args: Vec<String>,

        /// Maximum concurrent classifier calls
        #[arg(long, default_value = "4")]
        concurrency: usize,

        /// Result table path [default: <output>/../result.json]
        #[arg(long)]
        result: Option<PathBuf>,
    },
}

/// Options shared by every subcommand.
///
/// Values start from the photo preset, or from `--config` when given, and
/// individual flags override them.
#[derive(Args, Debug)]
struct SplitArgs {
    /// Input image
    input: PathBuf,

    /// JSON file with pipeline options; missing fields use library defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Adaptive threshold block size (forced odd)
    #[arg(long)]
    block_size: Option<u32>,

    /// Constant subtracted from the local mean
    #[arg(long, allow_hyphen_values = true)]
    thresh_c: Option<i32>,

    /// Horizontal line kernel is image width / this
    #[arg(long)]
    horiz_scale: Option<u32>,

    /// Vertical line kernel is image height / this
    #[arg(long)]
    vert_scale: Option<u32>,

    /// Minimum cell area in pixels
    #[arg(long)]
    min_area: Option<u64>,

    /// Crop padding in pixels
    #[arg(long)]
    pad: Option<u32>,

    /// Row clustering tolerance in pixels
    #[arg(long)]
    row_tolerance: Option<f64>,

    /// Row assignment policy
    #[arg(long, value_enum)]
    row_policy: Option<RowPolicyArg>,

    /// Contour selection mode
    #[arg(long, value_enum)]
    contour_mode: Option<ContourModeArg>,
}

impl SplitArgs {
    fn to_config(&self) -> Result<SplitConfig> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => SplitConfig::photo_defaults(),
        };

        if let Some(size) = self.block_size {
            config.thresh_block_size = size;
        }
        if let Some(c) = self.thresh_c {
            config.thresh_c = c;
        }
        if let Some(scale) = self.horiz_scale {
            config.horiz_scale = scale;
        }
        if let Some(scale) = self.vert_scale {
            config.vert_scale = scale;
        }
        if let Some(area) = self.min_area {
            config.min_cell_area = area;
        }
        if let Some(pad) = self.pad {
            config.pad = pad;
        }
        if let Some(tolerance) = self.row_tolerance {
            config.row_tolerance = tolerance;
        }
        if let Some(policy) = self.row_policy {
            config.row_policy = policy.into();
        }
        if let Some(mode) = self.contour_mode {
            config.contour_mode = mode.into();
        }

        config.validate()?;
        Ok(config)
    }
}

fn read_config(path: &Path) -> Result<SplitConfig> {
    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data).map_err(|source| CliError::ConfigFile {
        path: path.to_path_buf(),
        source,
    })
}

fn default_result_path(output: &Path) -> PathBuf {
    output
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join("result.json")
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Detect { split } => {
            let config = split.to_config()?;
            let pipeline = Pipeline::new(config)?;
            let image = load_image(&split.input)?;
            let layout = pipeline.analyze(&image);

            println!("File: {}", split.input.display());
            println!("Size: {}x{}", image.width(), image.height());
            println!(
                "Strategy: {}",
                layout.strategy.map_or("none", |strategy| strategy.name())
            );
            println!("Rows: {}", layout.rows.len());
            println!("Cells: {}", layout.cell_count());

            for (r, row) in layout.rows.iter().enumerate() {
                println!(
                    "  row {} (y ~ {:.1}): {} cell(s)",
                    r + 1,
                    row.center_y(),
                    row.len()
                );
                for (c, rect) in row.items().iter().enumerate() {
                    println!(
                        "    c{}: x={} y={} w={} h={}",
                        c + 1,
                        rect.x,
                        rect.y,
                        rect.width,
                        rect.height
                    );
                }
            }
        }

        Commands::Split {
            split,
            output,
            manifest,
        } => {
            let start = Instant::now();
            let pipeline = Pipeline::new(split.to_config()?)?;
            let cells = pipeline.run(&split.input, &output)?;

            if let Some(path) = manifest {
                write_json_file(&path, &cells)?;
                info!("wrote manifest {}", path.display());
            }

            println!(
                "Split {} into {} cell(s) in {:.2}s",
                split.input.display(),
                cells.len(),
                start.elapsed().as_secs_f64()
            );
            println!("Output: {}", output.display());
        }

        Commands::Run {
            split,
            output,
            classifier,
            classifier_args,
            concurrency,
            result,
        } => {
            let start = Instant::now();
            let pipeline = Pipeline::new(split.to_config()?)?;
            let cells = pipeline.run(&split.input, &output)?;

            let classifier = CommandClassifier::new(classifier).with_args(classifier_args);
            let classified = classify_cells(&cells, &classifier, concurrency)?;
            let table = merge_table(&classified);

            let result_path = result.unwrap_or_else(|| default_result_path(&output));
            write_json_file(&result_path, &table)?;

            let uncertain = classified
                .iter()
                .filter(|item| item.label.is_uncertain())
                .count();
            println!(
                "Classified {} cell(s) in {:.2}s ({} uncertain)",
                table.len(),
                start.elapsed().as_secs_f64(),
                uncertain
            );
            println!("Result: {}", result_path.display());
        }
    }

    Ok(())
}
