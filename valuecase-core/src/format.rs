//! Display helpers for dashboard values.
//!
//! Nothing here ever prints `NaN` or `inf`: non-finite inputs render as an
//! em-dash placeholder.

/// Shown in place of a value that cannot be computed.
pub const PLACEHOLDER: &str = "—";

/// Tiered currency: `$X.XM` at or above a million, `$XK` at or above a
/// thousand, `$X` otherwise. Negative values keep the same tiers with a
/// leading minus sign.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();
    if abs >= 1_000_000.0 {
        format!("{sign}${:.1}M", abs / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{sign}${:.0}K", abs / 1_000.0)
    } else {
        format!("{sign}${:.0}", abs)
    }
}

/// Signed percentage with one decimal, e.g. `+12.0%` / `-15.0%`.
pub fn format_delta(delta: f64) -> String {
    if !delta.is_finite() {
        return PLACEHOLDER.to_string();
    }
    let sign = if delta > 0.0 { "+" } else { "" };
    format!("{sign}{delta:.1}%")
}

/// Whole-number percentage, e.g. `139%`.
pub fn format_percent0(pct: f64) -> String {
    if !pct.is_finite() {
        return PLACEHOLDER.to_string();
    }
    format!("{pct:.0}%")
}

/// Month count with one decimal; `None` renders as `n/a`.
pub fn format_months(months: Option<f64>) -> String {
    match months {
        Some(m) if m.is_finite() => format!("{m:.1} months"),
        _ => "n/a".to_string(),
    }
}

/// Integer with thousands separators, e.g. `1,500,000`.
pub fn format_count(value: f64) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    let rounded = format!("{:.0}", value.abs());
    let mut out = String::with_capacity(rounded.len() + rounded.len() / 3);
    for (i, ch) in rounded.chars().enumerate() {
        if i > 0 && (rounded.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if value < 0.0 && rounded != "0" {
        out.insert(0, '-');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_tiers() {
        assert_eq!(format_currency(2_340_000.0), "$2.3M");
        assert_eq!(format_currency(1_000_000.0), "$1.0M");
        assert_eq!(format_currency(150_000.0), "$150K");
        assert_eq!(format_currency(1_000.0), "$1K");
        assert_eq!(format_currency(999.0), "$999");
        assert_eq!(format_currency(0.0), "$0");
    }

    #[test]
    fn test_currency_negative_and_non_finite() {
        assert_eq!(format_currency(-550_000.0), "-$550K");
        assert_eq!(format_currency(f64::NAN), PLACEHOLDER);
        assert_eq!(format_currency(f64::INFINITY), PLACEHOLDER);
    }

    #[test]
    fn test_delta_sign() {
        assert_eq!(format_delta(12.04), "+12.0%");
        assert_eq!(format_delta(-15.0), "-15.0%");
        assert_eq!(format_delta(0.0), "0.0%");
        assert_eq!(format_delta(f64::NAN), PLACEHOLDER);
    }

    #[test]
    fn test_percent_and_months() {
        assert_eq!(format_percent0(139.4), "139%");
        assert_eq!(format_months(Some(6.72)), "6.7 months");
        assert_eq!(format_months(None), "n/a");
        assert_eq!(format_months(Some(f64::INFINITY)), "n/a");
    }

    #[test]
    fn test_count_separators() {
        assert_eq!(format_count(1_500_000.0), "1,500,000");
        assert_eq!(format_count(999.0), "999");
        assert_eq!(format_count(1_000.0), "1,000");
        assert_eq!(format_count(-12_345.0), "-12,345");
    }
}
