use chrono::{NaiveDate, NaiveDateTime};

pub const TIMESTAMP_FORMAT: &str = "%b %d, %Y %H:%M";
pub const LONG_DATE_FORMAT: &str = "%B %d, %Y";
pub const FILE_STAMP_FORMAT: &str = "%Y%m%d_%H%M";

/// "Mar 15, 2024 10:30"
pub fn format_timestamp(value: &NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

/// "March 15, 2024"
pub fn format_long_date(value: &NaiveDate) -> String {
    value.format(LONG_DATE_FORMAT).to_string()
}

/// `<base>_<yyyyMMdd_HHmm>.<extension>`
pub fn stamped_file_name(base: &str, extension: &str, now: &NaiveDateTime) -> String {
    format!("{}_{}.{}", base, now.format(FILE_STAMP_FORMAT), extension)
}

/// Integral floats print without a fractional part, the way the dashboard shows them.
pub fn format_number(n: &serde_json::Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

/// Two decimals with thousands separators: 1234.5 -> "1,234.50".
pub fn format_amount(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, fraction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(&serde_json::Number::from(5)), "5");
        assert_eq!(format_number(&serde_json::Number::from_f64(5.0).unwrap()), "5");
        assert_eq!(format_number(&serde_json::Number::from_f64(12.75).unwrap()), "12.75");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(400.0), "400.00");
        assert_eq!(format_amount(1234.5), "1,234.50");
        assert_eq!(format_amount(1_000_000.0), "1,000,000.00");
        assert_eq!(format_amount(-250.25), "-250.25");
    }

    #[test]
    fn test_stamped_file_name() {
        let now = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(9, 7, 0)
            .unwrap();
        assert_eq!(stamped_file_name("Sales", "xlsx", &now), "Sales_20240305_0907.xlsx");
    }
}
