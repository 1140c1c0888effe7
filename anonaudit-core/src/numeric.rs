//! Small rounding/percentage helpers shared by the stats components.
//!
//! The legacy report format rounds most percentages to three decimals but
//! `Suppressed` to one — an inconsistency spec compatibility requires
//! preserving exactly, so both precisions are exposed here rather than
//! hard-coding one.
//!
//! Rust's `f64` `Display` drops the fractional part for whole numbers
//! (`20.0` prints as `"20"`); the legacy format always carries at least one
//! decimal digit (`"20.0"`). [`format_float`] restores that.

/// Rounds `value` to `decimals` fractional digits (half-away-from-zero).
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// `round(100 * n / d, decimals)`, guarding `d == 0` by returning `0.0`.
#[must_use]
pub fn pct(n: f64, d: f64, decimals: i32) -> f64 {
    if d == 0.0 { 0.0 } else { round_to(100.0 * n / d, decimals) }
}

/// Renders a float the way the legacy format requires: shortest
/// representation that round-trips, but always at least one decimal digit.
#[must_use]
pub fn format_float(value: f64) -> String {
    let rendered = format!("{value}");
    if rendered.contains('.') {
        rendered
    } else {
        format!("{rendered}.0")
    }
}

/// Renders a percentage value as `"<v> %"`, the format every overview field
/// in the report uses.
#[must_use]
pub fn pct_string(n: f64, d: f64, decimals: i32) -> String {
    format!("{} %", format_float(pct(n, d, decimals)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_to_rounds_half_away_from_zero() {
        assert_eq!(round_to(8.33333, 3), 8.333);
        assert_eq!(round_to(12.0, 3), 12.0);
    }

    #[test]
    fn pct_guards_zero_denominator() {
        assert_eq!(pct(1.0, 0.0, 3), 0.0);
    }

    #[test]
    fn pct_matches_s6_prosecutor_highest() {
        // S6: smallest = 5, so pct(1, 5, 3) == 20.0
        assert_eq!(pct(1.0, 5.0, 3), 20.0);
    }

    #[test]
    fn format_float_always_carries_a_decimal_point() {
        assert_eq!(format_float(20.0), "20.0");
        assert_eq!(format_float(12.0), "12.0");
        assert_eq!(format_float(5.882), "5.882");
    }

    #[test]
    fn pct_string_appends_percent_suffix() {
        assert_eq!(pct_string(1.0, 17.0, 3), "5.882 %");
        assert_eq!(pct_string(1.0, 5.0, 3), "20.0 %");
    }
}
