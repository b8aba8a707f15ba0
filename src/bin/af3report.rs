//! AF3-Report CLI entry point
//!
//! ```bash
//! # Scan a prediction directory and write the summary workbook:
//! af3report scan predictions/ [--csv] [-o workbook.xlsx]
//!
//! # Count candidate directories without writing anything:
//! af3report check predictions/
//! ```

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use af3_report::config::{OutputFormats, ScanConfig};
use af3_report::pipeline::ScanPipeline;
use af3_report::scan::{CONFIDENCE_SUFFIX, FULL_DATA_SUFFIX};

/// AF3-Report: confidence triage for AlphaFold-3 prediction outputs
#[derive(Parser, Debug)]
#[command(name = "af3report")]
#[command(version)]
#[command(about = "Summarize AlphaFold-3 prediction outputs into one workbook", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan a directory of predictions and write the summary workbook
    Scan(ScanArgs),

    /// Check a directory for scannable predictions without writing outputs
    Check(CheckArgs),

    /// Show version and build info
    Version,
}

#[derive(Parser, Debug)]
struct ScanArgs {
    /// Root directory containing one subdirectory per predicted model
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Write the workbook to this path instead of the default
    /// <root>/<name>_af3_summary.xlsx
    #[arg(long, short = 'o')]
    out: Option<PathBuf>,

    /// Also write the detail table as CSV next to the workbook
    #[arg(long)]
    csv: bool,

    /// Thumbnail edge length in pixels
    #[arg(long, default_value = "128")]
    thumbnail_px: u32,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Root directory to inspect
    #[arg(default_value = ".")]
    root: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = match &cli.command {
        Commands::Scan(args) if args.verbose => "debug",
        _ => "info",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .init();

    match cli.command {
        Commands::Scan(args) => run_scan(args),
        Commands::Check(args) => run_check(args),
        Commands::Version => show_version(),
    }
}

fn run_scan(args: ScanArgs) -> Result<()> {
    println!("============================================================");
    println!("  AF3-Report v{} - Prediction Summary", af3_report::VERSION);
    println!("============================================================");
    println!();
    println!("Root:   {}", args.root.display());
    if let Some(ref out) = args.out {
        println!("Output: {}", out.display());
    }
    println!();

    let config = ScanConfig {
        root: args.root,
        workbook_path: args.out,
        output_formats: OutputFormats {
            xlsx: true,
            csv: args.csv,
        },
        thumbnail_px: args.thumbnail_px,
    };

    let summary = ScanPipeline::new(config).run()?;

    println!();
    println!("============================================================");
    println!("  SCAN COMPLETE");
    println!("============================================================");
    println!();
    println!("Models:      {} ({} dropped)", summary.n_models, summary.n_dropped);
    println!(
        "Base models: {} across {} seed labels",
        summary.n_base_models, summary.n_seed_labels
    );
    if let Some(ref workbook) = summary.workbook_path {
        println!("Workbook:    {}", workbook.display());
    }
    if let Some(ref csv) = summary.csv_path {
        println!("CSV:         {}", csv.display());
    }
    println!("Finished:    {}", summary.finished_at);
    println!();

    Ok(())
}

fn run_check(args: CheckArgs) -> Result<()> {
    println!("AF3-Report Scan Check");
    println!("=====================");
    println!();

    if !args.root.is_dir() {
        bail!(
            "Root is not a readable directory: {}\n\
             Pass the directory that holds one subdirectory per prediction.",
            args.root.display()
        );
    }

    let mut subdirs = 0usize;
    for entry in std::fs::read_dir(&args.root)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.starts_with('.') && entry.path().is_dir() {
            subdirs += 1;
        }
    }
    let qualifying = af3_report::scan::scan_root(&args.root)?.len();

    println!("Root:        {} (OK)", args.root.display());
    println!("Candidates:  {} subdirectories", subdirs);
    println!(
        "Qualifying:  {} with *{} + *{} pair",
        qualifying, FULL_DATA_SUFFIX, CONFIDENCE_SUFFIX
    );
    println!();

    if qualifying == 0 {
        println!("Nothing to scan yet. A prediction directory must contain both JSON files.");
    } else {
        println!("Ready: run `af3report scan {}`", args.root.display());
    }

    Ok(())
}

fn show_version() -> Result<()> {
    println!("af3report {}", af3_report::VERSION);
    println!();
    println!("Build info:");
    println!("  Platform: {}-{}", std::env::consts::OS, std::env::consts::ARCH);

    Ok(())
}
