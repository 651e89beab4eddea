/// Formats an amount of euro-cents as a two-decimal string, e.g. `250` → `"2.50"`.
///
/// The penalty ledger stores integer cents; formatting happens at the edge.
pub fn format_amount(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

/// Parses a user-entered decimal amount ("2.50", "2", "2.5") into cents.
/// Returns `None` for malformed input or more than two decimal places.
pub fn parse_amount(input: &str) -> Option<i64> {
    let trimmed = input.trim();
    let (whole, frac) = match trimmed.split_once('.') {
        Some((w, f)) => (w, f),
        None => (trimmed, ""),
    };

    if whole.is_empty() || frac.len() > 2 {
        return None;
    }

    let whole: i64 = whole.parse().ok()?;
    let frac_cents: i64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().ok()? * 10,
        _ => frac.parse().ok()?,
    };

    Some(whole.checked_mul(100)?.checked_add(frac_cents)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(250), "2.50");
        assert_eq!(format_amount(5), "0.05");
        assert_eq!(format_amount(10000), "100.00");
        assert_eq!(format_amount(-150), "-1.50");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("2.50"), Some(250));
        assert_eq!(parse_amount("2.5"), Some(250));
        assert_eq!(parse_amount("2"), Some(200));
        assert_eq!(parse_amount(" 0.05 "), Some(5));
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("2.505"), None);
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount(".50"), None);
    }
}
