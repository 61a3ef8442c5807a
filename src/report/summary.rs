use std::io::{self, Write};

use serde::Serialize;

use crate::config::AnalysisSettings;
use crate::data::filter::{count_status, deviating, pct_inside_values, StatusCounts};
use crate::data::model::{GrowthRow, ThicknessRow};

/// Bin edges for the `pct_inside` distribution; intervals are `(lo, hi]`.
pub const PCT_BIN_EDGES: [f64; 13] = [
    0.0, 20.0, 35.0, 40.0, 42.0, 44.0, 46.0, 48.0, 50.0, 55.0, 60.0, 80.0, 100.0,
];

/// Longest histogram bar, in glyphs.
pub const MAX_BAR: usize = 60;

const RULE: &str = "============================================================";

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

/// Descriptive statistics of a sample; fields are `None` when undefined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PctStats {
    pub count: usize,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    /// Sample standard deviation (n - 1 denominator).
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl PctStats {
    pub fn from_values(values: &[f64]) -> Self {
        let n = values.len();
        if n == 0 {
            return Self::default();
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let mean = values.iter().sum::<f64>() / n as f64;
        let median = if n % 2 == 1 {
            sorted[n / 2]
        } else {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        };
        let std = (n > 1).then(|| {
            let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (n - 1) as f64).sqrt()
        });

        PctStats {
            count: n,
            mean: Some(mean),
            median: Some(median),
            std,
            min: sorted.first().copied(),
            max: sorted.last().copied(),
        }
    }
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub label: String,
    pub count: usize,
}

/// Count values per right-closed interval between consecutive `edges`.
///
/// Values at or below the first edge, or above the last, are not counted.
pub fn histogram(values: &[f64], edges: &[f64]) -> Vec<HistogramBin> {
    edges
        .windows(2)
        .map(|w| {
            let (lo, hi) = (w[0], w[1]);
            HistogramBin {
                label: format!("{lo}-{hi}"),
                count: values.iter().filter(|&&v| v > lo && v <= hi).count(),
            }
        })
        .collect()
}

/// `█` repeated `count` times, at most `cap`.
pub fn bar(count: usize, cap: usize) -> String {
    "█".repeat(count.min(cap))
}

// ---------------------------------------------------------------------------
// Growth check summary
// ---------------------------------------------------------------------------

/// Aggregate view of a growth check, also written as JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthSummary {
    pub counts: StatusCounts,
    pub expected_pct_inside: f64,
    pub deviation_tolerance: f64,
    pub pct_inside: PctStats,
    pub histogram: Vec<HistogramBin>,
    pub deviating: usize,
}

impl GrowthSummary {
    pub fn from_rows(rows: &[GrowthRow], settings: &AnalysisSettings) -> Self {
        let values = pct_inside_values(rows);
        GrowthSummary {
            counts: count_status(rows),
            expected_pct_inside: settings.expected_pct_inside,
            deviation_tolerance: settings.deviation_tolerance,
            pct_inside: PctStats::from_values(&values),
            histogram: histogram(&values, &PCT_BIN_EDGES),
            deviating: deviating(rows, settings.expected_pct_inside, settings.deviation_tolerance)
                .len(),
        }
    }
}

fn pct(v: Option<f64>) -> String {
    match v {
        Some(v) => format!("{v:.1}%"),
        None => "n/a".to_string(),
    }
}

fn cell(v: Option<f64>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}

/// Print the full growth check report.
pub fn render_growth_report(
    out: &mut impl Write,
    rows: &[GrowthRow],
    settings: &AnalysisSettings,
) -> io::Result<()> {
    let summary = GrowthSummary::from_rows(rows, settings);
    let counts = summary.counts;
    let expected = settings.expected_pct_inside;
    let tolerance = settings.deviation_tolerance;

    writeln!(out, "\n{RULE}")?;
    writeln!(out, "SUMMARY")?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "Total simulations processed : {}", counts.total)?;
    writeln!(out, "OK                          : {}", counts.ok)?;
    writeln!(out, "No oxide                    : {}", counts.no_oxide)?;
    writeln!(out, "Zero thickness              : {}", counts.zero_thickness)?;
    writeln!(out, "Errors                      : {}", counts.errors)?;

    let stats = summary.pct_inside;
    writeln!(out, "\n{RULE}")?;
    writeln!(out, "% OXIDE INSIDE SILICON ({expected}% expected)")?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "  Mean   : {}", pct(stats.mean))?;
    writeln!(out, "  Median : {}", pct(stats.median))?;
    writeln!(out, "  Std    : {}", pct(stats.std))?;
    writeln!(out, "  Min    : {}", pct(stats.min))?;
    writeln!(out, "  Max    : {}", pct(stats.max))?;

    writeln!(out, "\n  Distribution of % inside silicon:")?;
    for bin in &summary.histogram {
        writeln!(out, "  {:8}: {:5}  {}", bin.label, bin.count, bar(bin.count, MAX_BAR))?;
    }

    writeln!(out, "\n{RULE}")?;
    writeln!(out, "SIMULATIONS DEVIATING MORE THAN {tolerance}% FROM {expected}%")?;
    writeln!(out, "{RULE}")?;

    let dev = deviating(rows, expected, tolerance);
    if dev.is_empty() {
        writeln!(
            out,
            "  None! All simulations follow the {expected}% rule closely."
        )?;
        return Ok(());
    }

    writeln!(
        out,
        "  Count: {} ({:.1}% of total)",
        dev.len(),
        100.0 * dev.len() as f64 / counts.ok as f64
    )?;
    writeln!(
        out,
        "{:>24} {:>8} {:>8} {:>8} {:>10} {:>10} {:>10} {:>10}",
        "file", "pres", "temp", "time", "pct_inside", "inside_um", "outside_um", "total_um"
    )?;
    for row in dev.iter().take(settings.max_deviating_rows) {
        writeln!(
            out,
            "{:>24} {:>8} {:>8} {:>8} {:>10} {:>10} {:>10} {:>10}",
            row.file,
            cell(row.pres),
            cell(row.temp),
            cell(row.time),
            cell(row.pct_inside),
            cell(row.inside_um),
            cell(row.outside_um),
            cell(row.total_um),
        )?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Thickness sample
// ---------------------------------------------------------------------------

/// Print the unique row count and the first `n` rows of the thickness table.
pub fn render_thickness_sample(
    out: &mut impl Write,
    rows: &[ThicknessRow],
    n: usize,
) -> io::Result<()> {
    writeln!(out, "\nTotal unique simulation entries: {}", rows.len())?;
    writeln!(out, "\nSample:")?;
    writeln!(
        out,
        "{:>8} {:>6} {:>6} {:>8} {:>8} {:>11} {:>11} {:>11}",
        "pres", "o2", "n2", "temp", "time", "x_min", "x_max", "thickness"
    )?;
    for row in rows.iter().take(n) {
        writeln!(out, "{row}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::RunStatus;

    fn ok_row(file: &str, pct: f64) -> GrowthRow {
        GrowthRow {
            pct_inside: Some(pct),
            pct_outside: Some(100.0 - pct),
            inside_um: Some(pct / 100.0),
            outside_um: Some(1.0 - pct / 100.0),
            total_um: Some(1.0),
            ..GrowthRow::bare(file, RunStatus::Ok, None)
        }
    }

    #[test]
    fn stats_over_sample() {
        let s = PctStats::from_values(&[40.0, 44.0, 46.0, 50.0]);
        assert_eq!(s.count, 4);
        assert_eq!(s.mean, Some(45.0));
        assert_eq!(s.median, Some(45.0));
        assert_eq!(s.min, Some(40.0));
        assert_eq!(s.max, Some(50.0));
        // squared deviations 25 + 1 + 1 + 25 = 52, / 3
        let std = s.std.unwrap();
        assert!((std - (52.0f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn stats_degenerate_samples() {
        assert_eq!(PctStats::from_values(&[]), PctStats::default());
        let one = PctStats::from_values(&[44.0]);
        assert_eq!(one.median, Some(44.0));
        assert_eq!(one.std, None);
    }

    #[test]
    fn histogram_is_right_closed() {
        let bins = histogram(&[0.0, 20.0, 20.1, 44.0, 44.5, 100.0], &PCT_BIN_EDGES);
        assert_eq!(bins.len(), 12);
        assert_eq!(bins[0].label, "0-20");
        assert_eq!(bins[0].count, 1);
        assert_eq!(bins[1].count, 1);
        assert_eq!(bins[4].label, "42-44");
        assert_eq!(bins[4].count, 1);
        assert_eq!(bins[5].count, 1);
        assert_eq!(bins[11].label, "80-100");
        assert_eq!(bins[11].count, 1);
        // 0.0 falls outside (0, 20]
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 5);
    }

    #[test]
    fn bar_is_capped() {
        assert_eq!(bar(3, MAX_BAR), "███");
        assert_eq!(bar(500, MAX_BAR).chars().count(), MAX_BAR);
        assert_eq!(bar(5, 2), "██");
    }

    #[test]
    fn report_lists_deviating_runs() {
        let rows = vec![
            ok_row("a.csv", 44.0),
            ok_row("b.csv", 70.0),
            ok_row("c.csv", 20.0),
            GrowthRow::error("d.csv", "bad"),
        ];
        let mut buf = Vec::new();
        render_growth_report(&mut buf, &rows, &AnalysisSettings::default()).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("Total simulations processed : 4"));
        assert!(text.contains("Errors                      : 1"));
        assert!(text.contains("Count: 2 (66.7% of total)"));
        let c = text.find("c.csv").unwrap();
        let b = text.find("b.csv").unwrap();
        assert!(c < b, "deviating rows are sorted by pct_inside");
        assert!(!text.contains("a.csv"));
    }

    #[test]
    fn report_without_ok_rows() {
        let rows = vec![GrowthRow::bare("x.csv", RunStatus::NoOxide, None)];
        let mut buf = Vec::new();
        render_growth_report(&mut buf, &rows, &AnalysisSettings::default()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Mean   : n/a"));
        assert!(text.contains("None! All simulations follow the 44% rule closely."));
    }

    #[test]
    fn thickness_sample_is_truncated() {
        let row = ThicknessRow {
            pres: 1.0,
            o2: 1.0,
            n2: 0.0,
            temp: 1000.0,
            time: 10.0,
            x_min: -0.1,
            x_max: 0.1,
            thickness: 0.2,
        };
        let rows = vec![row; 15];
        let mut buf = Vec::new();
        render_thickness_sample(&mut buf, &rows, 10).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Total unique simulation entries: 15"));
        assert_eq!(text.matches("0.200000").count(), 10);
    }
}
