/// Shown wherever a metric is undefined for the current row set.
pub const NOT_APPLICABLE: &str = "N/A";

/// `$X.XX`, sign after the dollar (`$-10.00`).
pub fn fmt_money(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("${:.2}", v),
        None => NOT_APPLICABLE.to_string(),
    }
}

/// Fraction in [0, 1] as `XX.XX%`.
pub fn fmt_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}%", v * 100.0),
        None => NOT_APPLICABLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money() {
        assert_eq!(fmt_money(Some(10.0)), "$10.00");
        assert_eq!(fmt_money(Some(-10.0)), "$-10.00");
        assert_eq!(fmt_money(Some(1234.567)), "$1234.57");
        assert_eq!(fmt_money(None), "N/A");
    }

    #[test]
    fn percent() {
        assert_eq!(fmt_percent(Some(0.5)), "50.00%");
        assert_eq!(fmt_percent(Some(0.0)), "0.00%");
        assert_eq!(fmt_percent(Some(2.0 / 3.0)), "66.67%");
        assert_eq!(fmt_percent(None), "N/A");
    }
}
