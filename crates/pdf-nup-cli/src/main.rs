mod logger;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use pdf_nup::constants::pt_to_mm;
use pdf_nup::{NupOptions, NupStatistics, OrientationPolicy, PaperSize, ScalingMode, SheetSize};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "pdfnup", about = "Place several PDF pages on each output sheet", version)]
struct Cli {
    /// Input PDF file(s)
    #[arg(required = true, num_args = 1..)]
    inputs: Vec<PathBuf>,

    /// Source pages per sheet: a square (1, 4, 9, ...) or twice a square (2, 8, 18, ...)
    /// [default: 4]
    #[arg(short = 'n', long)]
    pages_per_sheet: Option<usize>,

    /// Slot order, e.g. "row-major,L2R,T2B" or a code like "RD", "DL"
    #[arg(short, long)]
    layout: Option<String>,

    /// Output name pattern using {dirname}, {base}, {ext} and {n}
    /// [default: {base}-{n}up{ext}]
    #[arg(short, long)]
    output: Option<String>,

    /// Output paper size
    #[arg(long, value_enum)]
    paper: Option<PaperArg>,

    /// Output orientation
    #[arg(long, value_enum)]
    orientation: Option<OrientationArg>,

    /// Scaling mode
    #[arg(long, value_enum)]
    scaling: Option<ScalingArg>,

    /// JSON options file; other flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Show statistics only, don't generate PDF
    #[arg(long)]
    stats_only: bool,

    /// Print each written file
    #[arg(short, long)]
    verbose: bool,

    /// Log level for diagnostics on stderr
    #[arg(long, default_value = "warn", value_enum)]
    log_level: LogLevelArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    /// Same size as the first source page
    Source,
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Auto,
    Portrait,
    Landscape,
}

#[derive(Clone, Copy, ValueEnum)]
enum ScalingArg {
    Fill,
    Fit,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<PaperArg> for SheetSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::Source => Self::MatchSource,
            PaperArg::A3 => Self::Paper(PaperSize::A3),
            PaperArg::A4 => Self::Paper(PaperSize::A4),
            PaperArg::A5 => Self::Paper(PaperSize::A5),
            PaperArg::Letter => Self::Paper(PaperSize::Letter),
            PaperArg::Legal => Self::Paper(PaperSize::Legal),
            PaperArg::Tabloid => Self::Paper(PaperSize::Tabloid),
        }
    }
}

impl From<OrientationArg> for OrientationPolicy {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Auto => Self::Auto,
            OrientationArg::Portrait => Self::Portrait,
            OrientationArg::Landscape => Self::Landscape,
        }
    }
}

impl From<ScalingArg> for ScalingMode {
    fn from(arg: ScalingArg) -> Self {
        match arg {
            ScalingArg::Fill => Self::Fill,
            ScalingArg::Fit => Self::Fit,
        }
    }
}

impl From<LogLevelArg> for log::LevelFilter {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Off => Self::Off,
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
            LogLevelArg::Trace => Self::Trace,
        }
    }
}

impl Cli {
    /// Options from `--config` (or defaults) with flags applied on top
    async fn options(&self) -> Result<NupOptions> {
        let mut options = match &self.config {
            Some(path) => NupOptions::load(path)
                .await
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => NupOptions::default(),
        };

        if let Some(n) = self.pages_per_sheet {
            options.pages_per_sheet = n;
        }
        if let Some(layout) = &self.layout {
            options.direction = layout.parse()?;
        }
        if let Some(pattern) = &self.output {
            options.output_pattern = pattern.clone();
        }
        if let Some(paper) = self.paper {
            options.sheet_size = paper.into();
        }
        if let Some(orientation) = self.orientation {
            options.orientation = orientation.into();
        }
        if let Some(scaling) = self.scaling {
            options.scaling_mode = scaling.into();
        }
        options.verbose |= self.verbose;

        options.validate()?;
        Ok(options)
    }
}

fn print_statistics(input: &Path, stats: &NupStatistics) {
    let (width, height) = stats.sheet_size_pt;
    println!("{}:", input.display());
    println!("  Source pages: {}", stats.source_pages);
    println!(
        "  Grid: {} x {} ({} per sheet)",
        stats.cols, stats.rows, stats.pages_per_sheet
    );
    println!(
        "  Sheet size: {:.1} x {:.1} pt ({:.0} x {:.0} mm)",
        width,
        height,
        pt_to_mm(width),
        pt_to_mm(height)
    );
    println!("  Output sheets: {}", stats.output_sheets);
    println!("  Empty slots: {}", stats.empty_slots);
}

async fn process(input: &Path, options: &NupOptions, stats_only: bool) -> Result<()> {
    if stats_only {
        let document = pdf_nup::load_pdf(input).await?;
        let stats = pdf_nup::calculate_statistics(&document, options)?;
        print_statistics(input, &stats);
        return Ok(());
    }

    pdf_nup::nup_file(input, None, options).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    logger::StderrLogger::new(cli.log_level.into())
        .init()
        .context("Failed to install logger")?;

    let options = cli.options().await?;

    let mut failures = 0;
    for input in &cli.inputs {
        if let Err(err) = process(input, &options, cli.stats_only)
            .await
            .with_context(|| format!("Failed to process {}", input.display()))
        {
            eprintln!("error: {:#}", err);
            failures += 1;
        }
    }

    if failures > 0 {
        log::warn!("{} of {} inputs failed", failures, cli.inputs.len());
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
