use crate::error::{OxideError, Result};

use super::model::SimulationParams;

/// Literal markers preceding each numeric field, in header order.
const MARKERS: [(&str, &str); 5] = [
    ("Pres_", "pressure"),
    ("_O2_", "O2"),
    ("_N2_", "N2"),
    ("_Temp_", "temperature"),
    ("_time_", "time"),
];

/// Extract simulation parameters from a column header.
///
/// Headers look like `Pres_1.0_O2_0.8_N2_0.2_Temp_1000_time_30 X`; the
/// pattern may appear anywhere in the header. Each value is a run of ASCII
/// digits and dots. Returns `Ok(None)` when no occurrence of the pattern is
/// found, and an error when a matched value is not a valid float
/// (e.g. `1.2.3`).
pub fn parse_params(header: &str) -> Result<Option<SimulationParams>> {
    let mut start = 0;
    while let Some(offset) = header[start..].find(MARKERS[0].0) {
        let at = start + offset;
        if let Some(raw) = match_at(&header[at..]) {
            return to_params(raw).map(Some);
        }
        start = at + 1;
    }
    Ok(None)
}

/// Try to match the full pattern at the start of `s`, returning the five raw values.
fn match_at(s: &str) -> Option<[(&'static str, &str); 5]> {
    let mut rest = s;
    let mut out = [("", ""); 5];
    for (slot, (marker, field)) in out.iter_mut().zip(MARKERS) {
        rest = rest.strip_prefix(marker)?;
        let len = rest
            .bytes()
            .take_while(|b| b.is_ascii_digit() || *b == b'.')
            .count();
        if len == 0 {
            return None;
        }
        *slot = (field, &rest[..len]);
        rest = &rest[len..];
    }
    Some(out)
}

fn to_params(raw: [(&'static str, &str); 5]) -> Result<SimulationParams> {
    let mut values = [0.0; 5];
    for (value, (field, text)) in values.iter_mut().zip(raw) {
        *value = text.parse::<f64>().map_err(|_| OxideError::InvalidParameter {
            field,
            value: text.to_string(),
        })?;
    }
    let [pres, o2, n2, temp, time] = values;
    Ok(SimulationParams {
        pres,
        o2,
        n2,
        temp,
        time,
    })
}
