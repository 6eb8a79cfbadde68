//! Formatting helpers for presenting model scores.

/// Fraction in [0, 1] as a percentage number with two decimals, no sign.
pub fn percent_value(fraction: f64) -> String {
    format!("{:.2}", fraction * 100.0)
}

/// `0.9423` renders as `94.23%`.
pub fn format_percent(fraction: f64) -> String {
    format!("{}%", percent_value(fraction))
}

/// Rounded percentage used for compact region badges.
pub fn format_percent_whole(fraction: f64) -> String {
    format!("{:.0}%", fraction * 100.0)
}

/// CSS length for overlay placement, e.g. `left: 12.5%`.
pub fn css_percent(fraction: f64) -> String {
    format!("{:.3}%", fraction.clamp(0.0, 1.0) * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_decimal_percentages() {
        assert_eq!(format_percent(0.9423), "94.23%");
        assert_eq!(format_percent(0.5), "50.00%");
        assert_eq!(format_percent(1.0), "100.00%");
        assert_eq!(format_percent(0.0), "0.00%");
        assert_eq!(percent_value(0.81), "81.00");
    }

    #[test]
    fn whole_percentages_round() {
        assert_eq!(format_percent_whole(0.876), "88%");
        assert_eq!(format_percent_whole(0.5), "50%");
    }

    #[test]
    fn css_lengths_are_clamped() {
        assert_eq!(css_percent(0.125), "12.500%");
        assert_eq!(css_percent(1.5), "100.000%");
    }
}
