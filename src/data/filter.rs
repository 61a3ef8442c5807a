use std::collections::HashSet;

use serde::Serialize;

use super::model::{GrowthRow, RunStatus, ThicknessRow};

// ---------------------------------------------------------------------------
// Status partition
// ---------------------------------------------------------------------------

/// Row counts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub total: usize,
    pub ok: usize,
    pub no_oxide: usize,
    pub zero_thickness: usize,
    pub errors: usize,
}

pub fn count_status(rows: &[GrowthRow]) -> StatusCounts {
    let mut counts = StatusCounts {
        total: rows.len(),
        ..Default::default()
    };
    for row in rows {
        match row.status {
            RunStatus::Ok => counts.ok += 1,
            RunStatus::NoOxide => counts.no_oxide += 1,
            RunStatus::ZeroThickness => counts.zero_thickness += 1,
            RunStatus::Error(_) => counts.errors += 1,
        }
    }
    counts
}

/// Rows that contribute to the statistics.
pub fn ok_rows(rows: &[GrowthRow]) -> Vec<&GrowthRow> {
    rows.iter().filter(|r| r.status.is_ok()).collect()
}

/// `pct_inside` of every ok row, in table order.
pub fn pct_inside_values(rows: &[GrowthRow]) -> Vec<f64> {
    rows.iter()
        .filter(|r| r.status.is_ok())
        .filter_map(|r| r.pct_inside)
        .collect()
}

// ---------------------------------------------------------------------------
// Deviation from the expected inward share
// ---------------------------------------------------------------------------

/// Ok rows whose `pct_inside` differs from `expected` by more than `tolerance`,
/// sorted ascending by `pct_inside`. Ties keep table order.
pub fn deviating(rows: &[GrowthRow], expected: f64, tolerance: f64) -> Vec<&GrowthRow> {
    let mut out: Vec<&GrowthRow> = rows
        .iter()
        .filter(|r| r.status.is_ok())
        .filter(|r| r.pct_inside.is_some_and(|p| (p - expected).abs() > tolerance))
        .collect();
    out.sort_by(|a, b| {
        let a = a.pct_inside.unwrap_or(f64::NAN);
        let b = b.pct_inside.unwrap_or(f64::NAN);
        a.total_cmp(&b)
    });
    out
}

// ---------------------------------------------------------------------------
// Deduplication
// ---------------------------------------------------------------------------

/// Drop exact duplicate rows, keeping the first occurrence of each.
pub fn dedup_rows(rows: Vec<ThicknessRow>) -> Vec<ThicknessRow> {
    let mut seen = HashSet::with_capacity(rows.len());
    rows.into_iter().filter(|row| seen.insert(*row)).collect()
}
