//! pt-BR number rendering and the inverse numeric extraction.
//!
//! Decimals are rendered with `.` as thousands separator and `,` as decimal
//! separator (`1.234.567,89`). Currency amounts carry the `R$` prefix.

pub const CURRENCY_SYMBOL: &str = "R$";

/// Renders `value` with `decimals` fractional digits in pt-BR notation.
pub fn format_decimal(value: f64, decimals: usize) -> String {
    let rendered = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rendered.as_str(), None),
    };

    let grouped = group_thousands(int_part);

    let is_zero = rendered.chars().all(|c| c == '0' || c == '.');
    let sign = if value.is_sign_negative() && !is_zero {
        "-"
    } else {
        ""
    };

    match frac_part {
        Some(frac) => format!("{sign}{grouped},{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Renders a currency amount, e.g. `R$ 1.234,56`.
pub fn format_currency(value: f64) -> String {
    format!("{} {}", CURRENCY_SYMBOL, format_decimal(value, 2))
}

/// Renders `value` in pt-BR notation without losing precision.
///
/// The fraction is the shortest one that parses back to the same `f64`,
/// padded to at least two digits: `4.5` is `4,50` and `0.004` is `0,004`.
pub fn format_exact(value: f64) -> String {
    let rendered = format!("{}", value.abs());
    let (int_part, frac_part) = rendered.split_once('.').unwrap_or((rendered.as_str(), ""));
    let sign = if value.is_sign_negative() && value != 0.0 {
        "-"
    } else {
        ""
    };
    format!("{sign}{},{:0<2}", group_thousands(int_part), frac_part)
}

/// Currency counterpart of [`format_exact`].
pub fn format_currency_exact(value: f64) -> String {
    format!("{} {}", CURRENCY_SYMBOL, format_exact(value))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

/// Extracts a pt-BR decimal from free text.
///
/// Keeps only `[0-9,.-]`, drops thousands separators and converts the
/// decimal comma to a point. Returns `None` when nothing parseable remains.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let normalized: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
        .filter(|c| *c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    if normalized.is_empty() {
        return None;
    }
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Extracts an integer from free text, keeping only ASCII digits.
///
/// A minus sign immediately before the first digit is honoured.
pub fn parse_integer(raw: &str) -> Option<i64> {
    let first_digit = raw.find(|c: char| c.is_ascii_digit())?;
    let negative = raw[..first_digit].ends_with('-');
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    let magnitude: i64 = digits.parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_decimal_groups_thousands() {
        assert_eq!(format_decimal(1234567.891, 2), "1.234.567,89");
        assert_eq!(format_decimal(999.5, 2), "999,50");
        assert_eq!(format_decimal(1000.0, 2), "1.000,00");
        assert_eq!(format_decimal(0.0, 2), "0,00");
    }

    #[test]
    fn format_decimal_without_fraction() {
        assert_eq!(format_decimal(1234.4, 0), "1.234");
        assert_eq!(format_decimal(12.0, 0), "12");
    }

    #[test]
    fn format_decimal_negative() {
        assert_eq!(format_decimal(-1500.25, 2), "-1.500,25");
        assert_eq!(format_decimal(-0.001, 2), "0,00");
    }

    #[test]
    fn format_currency_prefix() {
        assert_eq!(format_currency(500000.0), "R$ 500.000,00");
        assert_eq!(format_currency(80.0), "R$ 80,00");
    }

    #[test]
    fn format_exact_keeps_every_digit() {
        assert_eq!(format_exact(4.5), "4,50");
        assert_eq!(format_exact(12.0), "12,00");
        assert_eq!(format_exact(0.004), "0,004");
        assert_eq!(format_exact(1_200_000.0), "1.200.000,00");
        assert_eq!(format_exact(123_456.789), "123.456,789");
        assert_eq!(format_exact(-2.25), "-2,25");
        assert_eq!(format_currency_exact(0.001), "R$ 0,001");
    }

    #[test]
    fn format_exact_parses_back_to_same_value() {
        for value in [0.004, 1e-7, 3.333, 0.1 + 0.2, 5.000000000000001, 987_654_321.123] {
            assert_eq!(parse_decimal(&format_exact(value)), Some(value));
        }
    }

    #[test]
    fn parse_decimal_strips_currency_and_grouping() {
        assert_eq!(parse_decimal("R$ 1.234.567,89"), Some(1234567.89));
        assert_eq!(parse_decimal(" 80,00"), Some(80.0));
        assert_eq!(parse_decimal("4,50"), Some(4.5));
        assert_eq!(parse_decimal("-1.500,25"), Some(-1500.25));
    }

    #[test]
    fn parse_decimal_rejects_empty_or_garbage() {
        assert_eq!(parse_decimal("R$"), None);
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("1,2,3"), None);
        assert_eq!(parse_decimal("--"), None);
    }

    #[test]
    fn parse_integer_keeps_digits() {
        assert_eq!(parse_integer("30"), Some(30));
        assert_eq!(parse_integer(" 2 vagas"), Some(2));
        assert_eq!(parse_integer("-1"), Some(-1));
        assert_eq!(parse_integer("abc"), None);
    }

    #[test]
    fn format_then_parse_preserves_two_decimals() {
        for value in [0.01, 80.0, 4.5, 1234.56, 987654321.12] {
            let parsed = parse_decimal(&format_currency(value)).unwrap();
            assert!((parsed - value).abs() < 0.005, "{value} -> {parsed}");
        }
    }
}
