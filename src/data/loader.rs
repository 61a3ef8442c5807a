use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{OxideError, Result};

use super::model::SimulationRun;
use super::params::parse_params;

// ---------------------------------------------------------------------------
// File discovery
// ---------------------------------------------------------------------------

/// List the `.csv` files directly inside `dir`, sorted by file name.
pub fn discover_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(OxideError::MissingDirectory(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let is_csv = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(".csv"));
        if is_csv && path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

// ---------------------------------------------------------------------------
// Table – a header row plus string cells
// ---------------------------------------------------------------------------

/// A CSV file held as raw text cells.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub headers: Vec<String>,
    /// Row-major cells; every row has exactly `headers.len()` entries.
    pub rows: Vec<Vec<String>>,
}

/// One X/Y column pair as borrowed cell views.
pub struct ColumnPair<'a> {
    pub x_header: &'a str,
    pub y_header: &'a str,
    pub x_index: usize,
    table: &'a Table,
}

impl ColumnPair<'_> {
    /// Numeric X/Y samples with missing rows dropped.
    pub fn cleaned(&self) -> (Vec<f64>, Vec<f64>) {
        let x = self.table.rows.iter().map(|r| r[self.x_index].as_str());
        let y = self.table.rows.iter().map(|r| r[self.x_index + 1].as_str());
        clean_pair(x, y)
    }
}

impl Table {
    /// Parse CSV text with a header row.
    ///
    /// Short rows are padded with empty cells; a row wider than the header
    /// is rejected, as is text without a header row.
    pub fn parse(text: &str) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
        if headers.is_empty() {
            return Err(OxideError::EmptyFile);
        }
        let width = headers.len();

        let mut rows = Vec::new();
        for (row_no, result) in reader.records().enumerate() {
            let record = result?;
            if record.len() > width {
                return Err(OxideError::RaggedRow {
                    row: row_no + 1,
                    expected: width,
                    found: record.len(),
                });
            }
            let mut cells: Vec<String> = record.iter().map(|c| c.to_string()).collect();
            cells.resize(width, String::new());
            rows.push(cells);
        }

        Ok(Table { headers, rows })
    }

    /// Column pairs `(0,1), (2,3), ...`; an odd trailing column is ignored.
    pub fn column_pairs(&self) -> impl Iterator<Item = ColumnPair<'_>> {
        (0..self.headers.len().saturating_sub(1))
            .step_by(2)
            .map(move |i| ColumnPair {
                x_header: &self.headers[i],
                y_header: &self.headers[i + 1],
                x_index: i,
                table: self,
            })
    }

    /// Every column pair as a cleaned [`SimulationRun`] tagged with `file`.
    pub fn runs<'a>(&'a self, file: &'a str) -> impl Iterator<Item = Result<SimulationRun>> + 'a {
        self.column_pairs().map(move |pair| {
            let params = parse_params(pair.x_header)?;
            let (x, y) = pair.cleaned();
            Ok(SimulationRun {
                file: file.to_string(),
                column: pair.x_header.to_string(),
                params,
                x,
                y,
            })
        })
    }
}

/// Read a Latin-1 encoded CSV export from disk.
pub fn read_table(path: &Path) -> Result<Table> {
    let bytes = std::fs::read(path)?;
    let text = decode_latin1(&bytes);
    let table = Table::parse(&text)?;
    debug!(
        "{}: {} columns, {} rows",
        path.display(),
        table.headers.len(),
        table.rows.len()
    );
    Ok(table)
}

/// Latin-1 maps every byte to the code point with the same value.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

// ---------------------------------------------------------------------------
// Numeric cleaning
// ---------------------------------------------------------------------------

/// Coerce both columns to numbers and keep only rows where both parse.
///
/// Empty, non-numeric and NaN cells count as missing. Infinite values are
/// kept.
pub fn clean_pair<'a>(
    x: impl IntoIterator<Item = &'a str>,
    y: impl IntoIterator<Item = &'a str>,
) -> (Vec<f64>, Vec<f64>) {
    x.into_iter()
        .zip(y)
        .filter_map(|(xs, ys)| Some((coerce(xs)?, coerce(ys)?)))
        .unzip()
}

fn coerce(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin1_bytes_decode_one_to_one() {
        let text = decode_latin1(&[b'a', 0xB5, b'm']);
        assert_eq!(text, "aµm");
    }

    #[test]
    fn pairs_skip_odd_trailing_column() {
        let table = Table::parse("a X,a Y,b X,b Y,extra\n1,2,3,4,5\n").unwrap();
        let headers: Vec<_> = table
            .column_pairs()
            .map(|p| (p.x_header.to_string(), p.y_header.to_string()))
            .collect();
        assert_eq!(
            headers,
            vec![
                ("a X".to_string(), "a Y".to_string()),
                ("b X".to_string(), "b Y".to_string())
            ]
        );
    }

    #[test]
    fn short_rows_are_padded_and_cleaned_away() {
        let table = Table::parse("X,Y,X2,Y2\n1,2,3,4\n5,6\n").unwrap();
        let pairs: Vec<_> = table.column_pairs().map(|p| p.cleaned()).collect();
        assert_eq!(pairs[0], (vec![1.0, 5.0], vec![2.0, 6.0]));
        assert_eq!(pairs[1], (vec![3.0], vec![4.0]));
    }

    #[test]
    fn runs_carry_params_and_samples() {
        let table = Table::parse(
            "Pres_1_O2_1_N2_0_Temp_1000_time_5 X,Y,plain X,plain Y\n-1,2,3,4\n2,2,,\n",
        )
        .unwrap();
        let runs: Vec<_> = table.runs("f.csv").collect::<Result<_>>().unwrap();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].file, "f.csv");
        assert_eq!(runs[0].params.map(|p| p.temp), Some(1000.0));
        assert_eq!(runs[0].x, vec![-1.0, 2.0]);
        assert_eq!(runs[1].column, "plain X");
        assert!(runs[1].params.is_none());
        assert_eq!(runs[1].y, vec![4.0]);
    }

    #[test]
    fn empty_text_has_no_columns() {
        assert!(matches!(Table::parse(""), Err(OxideError::EmptyFile)));
    }

    #[test]
    fn wide_row_is_rejected() {
        let err = Table::parse("X,Y\n1,2,3\n").unwrap_err();
        assert!(matches!(err, OxideError::RaggedRow { row: 1, expected: 2, found: 3 }));
    }

    #[test]
    fn cleaning_drops_rows_missing_either_side() {
        let (x, y) = clean_pair(
            ["1", "abc", "3", " 4 ", "", "6", "NaN"],
            ["10", "20", "", "40", "50", "inf", "70"],
        );
        assert_eq!(x, vec![1.0, 4.0, 6.0]);
        assert_eq!(y, vec![10.0, 40.0, f64::INFINITY]);
    }

    #[test]
    fn discovery_lists_sorted_csv_only() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.csv", "a.csv", "notes.txt", "c.CSV"] {
            std::fs::write(dir.path().join(name), "X,Y\n").unwrap();
        }
        let names: Vec<_> = discover_files(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.csv", "b.csv"]);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = discover_files(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, OxideError::MissingDirectory(_)));
    }
}
