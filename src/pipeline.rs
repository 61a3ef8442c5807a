//! The two batch passes over a directory of TCAD exports.
//!
//! Files are processed one after another. When a file fails, the rows its
//! earlier column pairs produced are kept, the failure is recorded, and the
//! next file is read.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::config::AnalysisSettings;
use crate::data::filter::dedup_rows;
use crate::data::loader::read_table;
use crate::data::model::{GrowthRow, ThicknessRow};
use crate::data::thickness::{extent_thickness, growth_split};
use crate::error::OxideError;

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Rows one file produced before it finished or failed.
#[derive(Debug)]
pub struct FileOutcome<T> {
    pub rows: Vec<T>,
    /// Set when reading the file or one of its column pairs failed.
    pub error: Option<OxideError>,
}

impl<T> FileOutcome<T> {
    fn failed(rows: Vec<T>, error: OxideError) -> Self {
        FileOutcome {
            rows,
            error: Some(error),
        }
    }
}

// ---------------------------------------------------------------------------
// Growth check (inside vs outside split)
// ---------------------------------------------------------------------------

/// Inside/outside rows for every column pair of one file.
///
/// Pairs whose header lacks the parameter pattern are kept with absent
/// parameters.
pub fn growth_rows_for_file(path: &Path, threshold: f64) -> FileOutcome<GrowthRow> {
    let file = file_label(path);
    let table = match read_table(path) {
        Ok(table) => table,
        Err(e) => return FileOutcome::failed(Vec::new(), e),
    };

    let mut rows = Vec::new();
    for run in table.runs(&file) {
        let run = match run {
            Ok(run) => run,
            Err(e) => return FileOutcome::failed(rows, e),
        };
        if run.params.is_none() {
            debug!("{file}: no parameters in header '{}'", run.column);
        }
        rows.push(growth_split(&run.file, run.params, &run.x, &run.y, threshold));
    }
    FileOutcome { rows, error: None }
}

/// Run the growth check over `files`, printing one progress line per file.
pub fn run_growth_check(
    files: &[PathBuf],
    settings: &AnalysisSettings,
    out: &mut impl Write,
) -> io::Result<Vec<GrowthRow>> {
    let mut results = Vec::new();

    for path in files {
        let file = file_label(path);
        let outcome = growth_rows_for_file(path, settings.oxide_threshold);
        let n_ok = outcome.rows.iter().filter(|r| r.status.is_ok()).count();
        results.extend(outcome.rows);
        match outcome.error {
            None => writeln!(out, "  Done: {file} ({n_ok} sims OK)")?,
            Some(e) => {
                warn!("{file}: {e}");
                writeln!(out, "  ERROR: {file} -> {e}")?;
                results.push(GrowthRow::error(&file, e.to_string()));
            }
        }
    }

    info!("growth check: {} rows from {} files", results.len(), files.len());
    Ok(results)
}

// ---------------------------------------------------------------------------
// Thickness extraction
// ---------------------------------------------------------------------------

/// Result of the thickness pass.
#[derive(Debug, Clone, Default)]
pub struct ThicknessExtraction {
    /// Unique rows in first-seen order.
    pub rows: Vec<ThicknessRow>,
    /// Files that failed part way or entirely; rows they produced first are kept.
    pub failed: Vec<String>,
}

/// Thickness rows for every column pair of one file.
///
/// Pairs whose header lacks the parameter pattern are skipped.
pub fn thickness_rows_for_file(path: &Path, threshold: f64) -> FileOutcome<ThicknessRow> {
    let file = file_label(path);
    let table = match read_table(path) {
        Ok(table) => table,
        Err(e) => return FileOutcome::failed(Vec::new(), e),
    };

    let mut rows = Vec::new();
    for run in table.runs(&file) {
        let run = match run {
            Ok(run) => run,
            Err(e) => return FileOutcome::failed(rows, e),
        };
        let Some(params) = run.params else {
            debug!("{file}: skipping column '{}', no parameters", run.column);
            continue;
        };
        rows.push(extent_thickness(params, &run.x, &run.y, threshold));
    }
    FileOutcome { rows, error: None }
}

/// Run the thickness extraction over `files`, printing one progress line per file.
pub fn run_thickness_extraction(
    files: &[PathBuf],
    settings: &AnalysisSettings,
    out: &mut impl Write,
) -> io::Result<ThicknessExtraction> {
    let mut all_rows = Vec::new();
    let mut failed = Vec::new();

    for path in files {
        let file = file_label(path);
        let outcome = thickness_rows_for_file(path, settings.oxide_threshold);
        all_rows.extend(outcome.rows);
        match outcome.error {
            None => writeln!(out, "  Done: {file}")?,
            Some(e) => {
                warn!("{file}: {e}");
                writeln!(out, "  ERROR: {file} -> {e}")?;
                failed.push(file);
            }
        }
    }

    let total = all_rows.len();
    let rows = dedup_rows(all_rows);
    info!(
        "thickness extraction: {} unique of {} rows, {} failed files",
        rows.len(),
        total,
        failed.len()
    );
    Ok(ThicknessExtraction { rows, failed })
}
