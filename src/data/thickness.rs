use super::model::{GrowthRow, RunStatus, SimulationParams, ThicknessRow};

/// Samples with Y strictly above this belong to the oxide layer.
pub const DEFAULT_OXIDE_THRESHOLD: f64 = 1.0;

/// Round to `decimals` places, exact halves to even; `-0.0` becomes `0.0`.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    let rounded = (value * scale).round_ties_even() / scale;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Min and max X over the oxide samples, or `None` if no sample exceeds `threshold`.
pub fn oxide_extent(x: &[f64], y: &[f64], threshold: f64) -> Option<(f64, f64)> {
    x.iter()
        .zip(y)
        .filter(|&(_, &yv)| yv > threshold)
        .map(|(&xv, _)| xv)
        .fold(None, |acc, xv| match acc {
            None => Some((xv, xv)),
            Some((lo, hi)) => Some((lo.min(xv), hi.max(xv))),
        })
}

// ---------------------------------------------------------------------------
// Report mode: inside vs outside the original substrate surface (x = 0)
// ---------------------------------------------------------------------------

/// Split the oxide extent of one run into growth below and above x = 0.
///
/// Lengths keep 4 decimals, percentages 1 decimal.
pub fn growth_split(
    file: &str,
    params: Option<SimulationParams>,
    x: &[f64],
    y: &[f64],
    threshold: f64,
) -> GrowthRow {
    let Some((x_min, x_max)) = oxide_extent(x, y, threshold) else {
        return GrowthRow::bare(file, RunStatus::NoOxide, params);
    };

    let outside = x_min.min(0.0).abs();
    let inside = x_max.max(0.0);
    let total = outside + inside;

    if total == 0.0 {
        return GrowthRow::bare(file, RunStatus::ZeroThickness, params);
    }

    let pct_inside = 100.0 * inside / total;
    let pct_outside = 100.0 * outside / total;

    GrowthRow {
        x_min: Some(round_to(x_min, 4)),
        x_max: Some(round_to(x_max, 4)),
        outside_um: Some(round_to(outside, 4)),
        inside_um: Some(round_to(inside, 4)),
        total_um: Some(round_to(total, 4)),
        pct_inside: Some(round_to(pct_inside, 1)),
        pct_outside: Some(round_to(pct_outside, 1)),
        ..GrowthRow::bare(file, RunStatus::Ok, params)
    }
}

// ---------------------------------------------------------------------------
// Extractor mode: raw oxide extent
// ---------------------------------------------------------------------------

/// Oxide thickness as `x_max - x_min`, zero when there is no oxide. 6 decimals.
pub fn extent_thickness(
    params: SimulationParams,
    x: &[f64],
    y: &[f64],
    threshold: f64,
) -> ThicknessRow {
    let (x_min, x_max) = oxide_extent(x, y, threshold).unwrap_or((0.0, 0.0));
    ThicknessRow {
        pres: params.pres,
        o2: params.o2,
        n2: params.n2,
        temp: params.temp,
        time: params.time,
        x_min: round_to(x_min, 6),
        x_max: round_to(x_max, 6),
        thickness: round_to(x_max - x_min, 6),
    }
}
