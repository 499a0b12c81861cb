use chrono::NaiveDate;
use std::time::Instant;
use tracing::{debug, info};

/// A simple wall-clock timer for logging elapsed time.
pub struct Timer {
    label: String,
    start: Instant,
}

impl Timer {
    pub fn start(label: impl Into<String>) -> Self {
        let label = label.into();
        debug!("⏱  Starting: {}", label);
        Self {
            label,
            start: Instant::now(),
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        info!(
            "⏱  Finished: {} (took {:.2?})",
            self.label,
            self.start.elapsed()
        );
    }
}

/// Format a large integer with thousands separators.
pub fn fmt_number(n: i64) -> String {
    let s = n.unsigned_abs().to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    if n < 0 {
        result.push('-');
    }
    result.chars().rev().collect()
}

/// Whole-dollar amount: 956794.0 → "$956,794", -1234.4 → "-$1,234".
pub fn fmt_currency(amount: f64) -> String {
    let digits = fmt_number(amount.round() as i64);
    match digits.strip_prefix('-') {
        Some(magnitude) => format!("-${}", magnitude),
        None => format!("${}", digits),
    }
}

/// Dollar price with cents: "$189.84".
pub fn fmt_price(price: f64) -> String {
    format!("${:.2}", price)
}

/// Signed percentage; non-negative values get a leading '+'.
pub fn fmt_signed_pct(value: f64, decimals: usize) -> String {
    format!("{}{:.*}%", sign_of(value), decimals, value)
}

/// Signed plain number with two decimals: "+4.25", "-2.18".
pub fn fmt_signed(value: f64) -> String {
    format!("{}{:.2}", sign_of(value), value)
}

fn sign_of(value: f64) -> &'static str {
    if value >= 0.0 { "+" } else { "" }
}

/// Trading volume shorthand: 58_420_000 → "58.4M", 45_300 → "45K".
/// Thousands round half away from zero, so 2_500 → "3K".
pub fn fmt_volume(volume: u64) -> String {
    if volume >= 1_000_000 {
        format!("{:.1}M", volume as f64 / 1_000_000.0)
    } else if volume >= 1_000 {
        format!("{}K", (volume as f64 / 1_000.0).round())
    } else {
        volume.to_string()
    }
}

/// "Aug 30, 2024"
pub fn fmt_date_long(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// "Aug 30"
pub fn fmt_date_short(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// Left-pad or truncate `s` to exactly `width` chars.
pub fn fit(s: &str, width: usize) -> String {
    let count = s.chars().count();
    if count > width {
        let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    } else {
        format!("{:<width$}", s, width = width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_number() {
        assert_eq!(fmt_number(1_234_567), "1,234,567");
        assert_eq!(fmt_number(0), "0");
        assert_eq!(fmt_number(-42_000), "-42,000");
        assert_eq!(fmt_number(999), "999");
    }

    #[test]
    fn test_fmt_currency_rounds_to_whole_dollars() {
        assert_eq!(fmt_currency(956_794.0), "$956,794");
        assert_eq!(fmt_currency(2_485_000.0), "$2,485,000");
        assert_eq!(fmt_currency(99.5), "$100");
        assert_eq!(fmt_currency(-1_234.4), "-$1,234");
        assert_eq!(fmt_currency(-0.4), "$0");
    }

    #[test]
    fn test_fmt_currency_saturates_at_i64_bounds() {
        assert_eq!(fmt_currency(-1e30), "-$9,223,372,036,854,775,808");
        assert_eq!(fmt_currency(f64::MIN), "-$9,223,372,036,854,775,808");
        assert_eq!(fmt_currency(1e30), "$9,223,372,036,854,775,807");
    }

    #[test]
    fn test_fmt_signed_pct() {
        assert_eq!(fmt_signed_pct(1.2, 2), "+1.20%");
        assert_eq!(fmt_signed_pct(-0.8, 2), "-0.80%");
        assert_eq!(fmt_signed_pct(0.0, 2), "+0.00%");
        assert_eq!(fmt_signed_pct(-2.1, 1), "-2.1%");
    }

    #[test]
    fn test_fmt_signed() {
        assert_eq!(fmt_signed(4.25), "+4.25");
        assert_eq!(fmt_signed(-2.18), "-2.18");
    }

    #[test]
    fn test_fmt_volume() {
        assert_eq!(fmt_volume(58_420_000), "58.4M");
        assert_eq!(fmt_volume(1_000_000), "1.0M");
        assert_eq!(fmt_volume(45_000), "45K");
        assert_eq!(fmt_volume(2_500), "3K");
        assert_eq!(fmt_volume(1_499), "1K");
        assert_eq!(fmt_volume(999), "999");
    }

    #[test]
    fn test_fmt_dates() {
        let d = NaiveDate::from_ymd_opt(2024, 8, 5).unwrap();
        assert_eq!(fmt_date_long(d), "Aug 5, 2024");
        assert_eq!(fmt_date_short(d), "Aug 5");
    }

    #[test]
    fn test_fit() {
        assert_eq!(fit("AAPL", 6), "AAPL  ");
        assert_eq!(fit("Microsoft Corporation", 10), "Microsoft…");
    }
}
