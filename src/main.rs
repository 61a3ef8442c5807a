//! # oxide-growth
//!
//! Command-line front end for the oxide growth passes.
//!
//! ```bash
//! # Check the 44 % inward growth rule
//! oxide-growth check --data-dir Data
//!
//! # Extract raw oxide thickness per parameter set
//! oxide-growth thickness --data-dir Data
//!
//! # Both, with settings from a config file
//! oxide-growth --config oxide-growth.toml all
//! ```

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use oxide_growth::config::{AnalysisSettings, Config};
use oxide_growth::data::loader::discover_files;
use oxide_growth::pipeline::{run_growth_check, run_thickness_extraction};
use oxide_growth::report::summary::{render_growth_report, render_thickness_sample, GrowthSummary};
use oxide_growth::report::writer::{write_growth_csv, write_summary_json, write_thickness_csv};

/// Oxide growth statistics from TCAD CSV exports
#[derive(Parser)]
#[command(name = "oxide-growth")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check how much oxide grows into vs. out of the silicon
    Check {
        /// Directory holding the CSV exports
        #[arg(short, long, value_name = "DIR")]
        data_dir: Option<PathBuf>,

        /// Output table (default: 44_percent_check.csv)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Also write a JSON summary
        #[arg(long, value_name = "FILE")]
        summary_json: Option<PathBuf>,
    },

    /// Extract oxide thickness per simulation parameter set
    Thickness {
        /// Directory holding the CSV exports
        #[arg(short, long, value_name = "DIR")]
        data_dir: Option<PathBuf>,

        /// Output table (default: oxide_thickness.csv)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Run the growth check and the thickness extraction
    All {
        /// Directory holding the CSV exports
        #[arg(short, long, value_name = "DIR")]
        data_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let settings = config.analysis();

    match cli.command {
        Commands::Check {
            data_dir,
            output,
            summary_json,
        } => {
            let data_dir = data_dir.unwrap_or_else(|| config.data_dir());
            let output = output.unwrap_or_else(|| config.growth_csv());
            let summary_json = summary_json.or_else(|| config.output.summary_json.clone());
            check(&data_dir, &output, summary_json.as_deref(), &settings)
        }
        Commands::Thickness { data_dir, output } => {
            let data_dir = data_dir.unwrap_or_else(|| config.data_dir());
            let output = output.unwrap_or_else(|| config.thickness_csv());
            thickness(&data_dir, &output, &settings)
        }
        Commands::All { data_dir } => {
            let data_dir = data_dir.unwrap_or_else(|| config.data_dir());
            check(
                &data_dir,
                &config.growth_csv(),
                config.output.summary_json.as_deref(),
                &settings,
            )?;
            thickness(&data_dir, &config.thickness_csv(), &settings)
        }
    }
}

fn list_inputs(data_dir: &Path, out: &mut impl Write) -> Result<Vec<PathBuf>> {
    let files = discover_files(data_dir)
        .with_context(|| format!("Failed to list {}", data_dir.display()))?;
    info!("{} input files in {}", files.len(), data_dir.display());
    writeln!(out, "Found {} CSV files\n", files.len())?;
    Ok(files)
}

fn check(
    data_dir: &Path,
    output: &Path,
    summary_json: Option<&Path>,
    settings: &AnalysisSettings,
) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let files = list_inputs(data_dir, &mut out)?;
    let expected = settings.expected_pct_inside;
    writeln!(
        out,
        "Checking {expected}% rule: {expected}% of oxide grows INTO silicon (x>0), {}% grows OUTSIDE (x<0)\n",
        100.0 - expected
    )?;

    let rows = run_growth_check(&files, settings, &mut out)?;
    render_growth_report(&mut out, &rows, settings)?;

    write_growth_csv(output, &rows)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    writeln!(out, "\nFull results saved to {}", output.display())?;

    if let Some(path) = summary_json {
        let summary = GrowthSummary::from_rows(&rows, settings);
        write_summary_json(path, &summary)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        writeln!(out, "Summary saved to {}", path.display())?;
    }
    Ok(())
}

fn thickness(data_dir: &Path, output: &Path, settings: &AnalysisSettings) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let files = list_inputs(data_dir, &mut out)?;
    let extraction = run_thickness_extraction(&files, settings, &mut out)?;
    render_thickness_sample(&mut out, &extraction.rows, settings.sample_rows)?;

    write_thickness_csv(output, &extraction.rows)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    writeln!(out, "\nSaved to {}", output.display())?;
    Ok(())
}
