//! TOML configuration file support.
//!
//! Every key is optional; anything left out falls back to the built-in
//! defaults, and command-line flags override both.
//!
//! ```toml
//! # oxide-growth.toml
//! [input]
//! data_dir = "/data/tcad/oxidation"
//!
//! [analysis]
//! oxide_threshold = 1.0
//! expected_pct_inside = 44.0
//! deviation_tolerance = 5.0
//! max_deviating_rows = 20
//! sample_rows = 10
//!
//! [output]
//! growth_csv = "44_percent_check.csv"
//! thickness_csv = "oxide_thickness.csv"
//! summary_json = "summary.json"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::data::thickness::DEFAULT_OXIDE_THRESHOLD;

pub const DEFAULT_DATA_DIR: &str = "Data";
pub const DEFAULT_GROWTH_CSV: &str = "44_percent_check.csv";
pub const DEFAULT_THICKNESS_CSV: &str = "oxide_thickness.csv";

/// Root configuration structure for oxide-growth.toml files.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,

    #[serde(default)]
    pub analysis: AnalysisConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputConfig {
    /// Directory holding the TCAD CSV exports.
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Y value above which a sample counts as oxide.
    pub oxide_threshold: Option<f64>,

    /// Expected share of growth into the silicon, in percent.
    pub expected_pct_inside: Option<f64>,

    /// Allowed distance from `expected_pct_inside` before a run is reported.
    pub deviation_tolerance: Option<f64>,

    /// Number of deviating runs printed in the report.
    pub max_deviating_rows: Option<usize>,

    /// Number of thickness rows printed as a sample.
    pub sample_rows: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    pub growth_csv: Option<PathBuf>,
    pub thickness_csv: Option<PathBuf>,
    /// Machine-readable summary of the growth check; not written when unset.
    pub summary_json: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    pub fn data_dir(&self) -> PathBuf {
        self.input
            .data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
    }

    pub fn growth_csv(&self) -> PathBuf {
        self.output
            .growth_csv
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_GROWTH_CSV))
    }

    pub fn thickness_csv(&self) -> PathBuf {
        self.output
            .thickness_csv
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_THICKNESS_CSV))
    }

    /// Analysis settings with defaults filled in.
    pub fn analysis(&self) -> AnalysisSettings {
        let d = AnalysisSettings::default();
        let a = &self.analysis;
        AnalysisSettings {
            oxide_threshold: a.oxide_threshold.unwrap_or(d.oxide_threshold),
            expected_pct_inside: a.expected_pct_inside.unwrap_or(d.expected_pct_inside),
            deviation_tolerance: a.deviation_tolerance.unwrap_or(d.deviation_tolerance),
            max_deviating_rows: a.max_deviating_rows.unwrap_or(d.max_deviating_rows),
            sample_rows: a.sample_rows.unwrap_or(d.sample_rows),
        }
    }
}

/// Resolved analysis parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisSettings {
    pub oxide_threshold: f64,
    pub expected_pct_inside: f64,
    pub deviation_tolerance: f64,
    pub max_deviating_rows: usize,
    pub sample_rows: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            oxide_threshold: DEFAULT_OXIDE_THRESHOLD,
            expected_pct_inside: 44.0,
            deviation_tolerance: 5.0,
            max_deviating_rows: 20,
            sample_rows: 10,
        }
    }
}
