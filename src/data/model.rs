use std::fmt;

use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// SimulationParams – run parameters encoded in the X column header
// ---------------------------------------------------------------------------

/// Process parameters of one TCAD oxidation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParams {
    /// Chamber pressure.
    pub pres: f64,
    /// O2 flow fraction.
    pub o2: f64,
    /// N2 flow fraction.
    pub n2: f64,
    /// Furnace temperature.
    pub temp: f64,
    /// Oxidation time.
    pub time: f64,
}

// ---------------------------------------------------------------------------
// SimulationRun – one X/Y column pair of one file
// ---------------------------------------------------------------------------

/// A single simulation run after numeric cleaning.
#[derive(Debug, Clone)]
pub struct SimulationRun {
    /// File name (no directory) the run was read from.
    pub file: String,
    /// Header of the X column.
    pub column: String,
    /// `None` when the header does not carry the parameter pattern.
    pub params: Option<SimulationParams>,
    /// Depth axis (x) – same length as `y`.
    pub x: Vec<f64>,
    /// Height axis (y).
    pub y: Vec<f64>,
}

// ---------------------------------------------------------------------------
// RunStatus
// ---------------------------------------------------------------------------

/// Outcome of the inside/outside computation for one row of the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    Ok,
    /// No sample lies above the oxide threshold.
    NoOxide,
    /// Oxide exists but sits exactly on the substrate boundary.
    ZeroThickness,
    /// The whole file failed; carries the error message.
    Error(String),
}

impl RunStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, RunStatus::Ok)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, RunStatus::Error(_))
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::Ok => write!(f, "ok"),
            RunStatus::NoOxide => write!(f, "no_oxide"),
            RunStatus::ZeroThickness => write!(f, "zero_thickness"),
            RunStatus::Error(msg) => write!(f, "error: {msg}"),
        }
    }
}

impl Serialize for RunStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ---------------------------------------------------------------------------
// GrowthRow – one row of the 44 % check table
// ---------------------------------------------------------------------------

/// Inside/outside split for one column pair, or a file-level error entry.
///
/// Field order matches the columns of the written table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthRow {
    pub file: String,
    pub status: RunStatus,
    pub pres: Option<f64>,
    pub o2: Option<f64>,
    pub n2: Option<f64>,
    pub temp: Option<f64>,
    pub time: Option<f64>,
    pub x_min: Option<f64>,
    pub x_max: Option<f64>,
    pub outside_um: Option<f64>,
    pub inside_um: Option<f64>,
    pub total_um: Option<f64>,
    pub pct_inside: Option<f64>,
    pub pct_outside: Option<f64>,
}

impl GrowthRow {
    /// A row with the given status and parameters and no measurements.
    pub fn bare(file: &str, status: RunStatus, params: Option<SimulationParams>) -> Self {
        GrowthRow {
            file: file.to_string(),
            status,
            pres: params.map(|p| p.pres),
            o2: params.map(|p| p.o2),
            n2: params.map(|p| p.n2),
            temp: params.map(|p| p.temp),
            time: params.map(|p| p.time),
            x_min: None,
            x_max: None,
            outside_um: None,
            inside_um: None,
            total_um: None,
            pct_inside: None,
            pct_outside: None,
        }
    }

    /// File-level failure entry.
    pub fn error(file: &str, message: impl Into<String>) -> Self {
        Self::bare(file, RunStatus::Error(message.into()), None)
    }
}

// ---------------------------------------------------------------------------
// ThicknessRow – one row of the extracted thickness table
// ---------------------------------------------------------------------------

/// Parameters plus raw oxide extent of one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThicknessRow {
    pub pres: f64,
    pub o2: f64,
    pub n2: f64,
    pub temp: f64,
    pub time: f64,
    pub x_min: f64,
    pub x_max: f64,
    pub thickness: f64,
}

impl ThicknessRow {
    fn fields(&self) -> [f64; 8] {
        [
            self.pres,
            self.o2,
            self.n2,
            self.temp,
            self.time,
            self.x_min,
            self.x_max,
            self.thickness,
        ]
    }
}

// -- Manual Eq/Hash so rows can be deduplicated through a HashSet --

impl Eq for ThicknessRow {}

impl std::hash::Hash for ThicknessRow {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        for v in self.fields() {
            // 0.0 and -0.0 compare equal, so they must hash alike.
            let v = if v == 0.0 { 0.0 } else { v };
            v.to_bits().hash(state);
        }
    }
}

impl fmt::Display for ThicknessRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>8} {:>6} {:>6} {:>8} {:>8} {:>11.6} {:>11.6} {:>11.6}",
            self.pres, self.o2, self.n2, self.temp, self.time, self.x_min, self.x_max, self.thickness
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_renders_like_the_table_column() {
        assert_eq!(RunStatus::Ok.to_string(), "ok");
        assert_eq!(RunStatus::NoOxide.to_string(), "no_oxide");
        assert_eq!(RunStatus::ZeroThickness.to_string(), "zero_thickness");
        assert_eq!(
            RunStatus::Error("bad row".into()).to_string(),
            "error: bad row"
        );
    }

    #[test]
    fn bare_row_copies_params() {
        let params = SimulationParams {
            pres: 1.0,
            o2: 0.5,
            n2: 0.5,
            temp: 1000.0,
            time: 30.0,
        };
        let row = GrowthRow::bare("a.csv", RunStatus::NoOxide, Some(params));
        assert_eq!(row.temp, Some(1000.0));
        assert_eq!(row.pct_inside, None);

        let err = GrowthRow::error("b.csv", "boom");
        assert!(err.status.is_error());
        assert_eq!(err.pres, None);
    }
}
