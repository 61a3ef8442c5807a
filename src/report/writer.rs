use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::data::model::{GrowthRow, ThicknessRow};
use crate::error::Result;

use super::summary::GrowthSummary;

const GROWTH_HEADER: [&str; 14] = [
    "file",
    "status",
    "pres",
    "o2",
    "n2",
    "temp",
    "time",
    "x_min",
    "x_max",
    "outside_um",
    "inside_um",
    "total_um",
    "pct_inside",
    "pct_outside",
];

const THICKNESS_HEADER: [&str; 8] = [
    "pres", "o2", "n2", "temp", "time", "x_min", "x_max", "thickness",
];

/// Write rows as CSV. The header is written explicitly so an empty
/// table still produces a header line.
fn write_rows<W: Write, T: Serialize>(sink: W, header: &[&str], rows: &[T]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(sink);
    writer.write_record(header)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_growth_csv(path: &Path, rows: &[GrowthRow]) -> Result<()> {
    write_rows(File::create(path)?, &GROWTH_HEADER, rows)
}

pub fn write_thickness_csv(path: &Path, rows: &[ThicknessRow]) -> Result<()> {
    write_rows(File::create(path)?, &THICKNESS_HEADER, rows)
}

pub fn write_summary_json(path: &Path, summary: &GrowthSummary) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut out, summary)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{RunStatus, SimulationParams};

    #[test]
    fn growth_table_writes_empty_cells_for_missing_values() {
        let params = SimulationParams {
            pres: 1.0,
            o2: 0.5,
            n2: 0.5,
            temp: 1000.0,
            time: 30.0,
        };
        let rows = vec![
            GrowthRow::bare("a.csv", RunStatus::NoOxide, Some(params)),
            GrowthRow::error("b.csv", "CSV error: bad"),
        ];
        let mut buf = Vec::new();
        write_rows(&mut buf, &GROWTH_HEADER, &rows).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], GROWTH_HEADER.join(","));
        assert_eq!(lines[1], "a.csv,no_oxide,1.0,0.5,0.5,1000.0,30.0,,,,,,,");
        assert_eq!(lines[2], "b.csv,error: CSV error: bad,,,,,,,,,,,,");
    }

    #[test]
    fn empty_thickness_table_has_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.csv");
        write_thickness_csv(&path, &[]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.trim_end(), THICKNESS_HEADER.join(","));
    }
}
