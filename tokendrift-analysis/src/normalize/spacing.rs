//! Spacing normalization to pixels.

use tokendrift_core::constants::REM_BASE_PX;

/// Normalize a spacing expression to pixels.
///
/// Unitless numbers and `px` pass through, `rem`/`em` multiply by the
/// 16px root font size. Negative values are preserved. Percentages,
/// viewport units, `auto`, and `calc()` depend on layout context and
/// return `None`.
pub fn normalize_spacing(input: &str) -> Option<f64> {
    let value = input.trim().to_ascii_lowercase();
    if value.is_empty() {
        return None;
    }
    let (number, unit) = split_number_unit(&value)?;
    let n: f64 = number.parse().ok()?;
    match unit {
        "" | "px" => Some(n),
        "rem" | "em" => Some(n * REM_BASE_PX),
        _ => None,
    }
}

/// Split a spacing expression into its numeric value and declared unit,
/// without converting. Unitless values report `px`.
pub fn spacing_parts(input: &str) -> Option<(f64, String)> {
    let value = input.trim().to_ascii_lowercase();
    let (number, unit) = split_number_unit(&value)?;
    let n: f64 = number.parse().ok()?;
    match unit {
        "" | "px" => Some((n, "px".to_string())),
        "rem" | "em" => Some((n, unit.to_string())),
        _ => None,
    }
}

/// Symmetric similarity of two pixel values in `[0, 1]`.
///
/// Relative distance scaled by the larger magnitude, floored at zero.
pub fn spacing_similarity(a: f64, b: f64) -> f64 {
    if a == b {
        return 1.0;
    }
    let denom = a.abs().max(b.abs());
    if denom == 0.0 {
        return 1.0;
    }
    (1.0 - (a - b).abs() / denom).max(0.0)
}

fn split_number_unit(value: &str) -> Option<(&str, &str)> {
    let bytes = value.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let digits_start = end;
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => end += 1,
            b'.' if !seen_dot => {
                seen_dot = true;
                end += 1;
            }
            _ => break,
        }
    }
    if end == digits_start {
        return None;
    }
    Some((&value[..end], value[end..].trim()))
}
