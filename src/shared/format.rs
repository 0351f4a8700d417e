//! Number formatting shared by report texts and slide markup.

/// Formats a number the way the report copy expects: integers without a
/// fractional part, everything else with trailing zeros removed.
///
/// `12.0 -> "12"`, `12.50 -> "12.5"`, `0.25 -> "0.25"`.
pub fn compact_number(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    if value.fract() == 0.0 {
        return format!("{}", value as i64);
    }
    let text = format!("{:.4}", value);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Rounds to one decimal place, exact halves to the even digit.
///
/// Decides on the exact value of `value`, not its shifted product:
/// `2.25 -> 2.2`, `0.75 -> 0.8`, `0.15 -> 0.1` (0.15 is stored just below).
pub fn round1(value: f64) -> f64 {
    let scaled = value * 10.0;
    if (scaled - scaled.trunc()).abs() != 0.5 {
        return scaled.round() / 10.0;
    }
    // `scaled` may itself be rounded; the fused residual is exact.
    let residual = value.mul_add(10.0, -scaled);
    let digit = if residual > 0.0 {
        scaled.ceil()
    } else if residual < 0.0 {
        scaled.floor()
    } else {
        scaled.round_ties_even()
    };
    digit / 10.0
}
