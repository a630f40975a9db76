//! Number formatting shared by the document tools.

/// Format a value with comma thousands grouping.
///
/// Integers drop the fractional part ("1,234"); other values keep the
/// default float rendering of the fraction ("1,234.56").
pub fn group_thousands(value: f64) -> String {
    let rendered = if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    };

    let (number, fraction) = match rendered.split_once('.') {
        Some((n, f)) => (n.to_string(), Some(f.to_string())),
        None => (rendered, None),
    };
    let (sign, digits) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number.as_str()),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match fraction {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Format a monetary amount: two decimals, comma grouping, dollar sign.
pub fn money(value: f64) -> String {
    let rendered = format!("{:.2}", value.abs());
    let (digits, fraction) = rendered.split_once('.').unwrap_or((rendered.as_str(), "00"));

    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}${grouped}.{fraction}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_integers() {
        assert_eq!(group_thousands(5.0), "5");
        assert_eq!(group_thousands(1234.0), "1,234");
        assert_eq!(group_thousands(1234567.0), "1,234,567");
    }

    #[test]
    fn keeps_fraction() {
        assert_eq!(group_thousands(1234.5), "1,234.5");
        assert_eq!(group_thousands(0.25), "0.25");
    }

    #[test]
    fn handles_negatives() {
        assert_eq!(group_thousands(-1234.0), "-1,234");
        assert_eq!(money(-1234.5), "-$1,234.50");
    }

    #[test]
    fn money_has_two_decimals() {
        assert_eq!(money(1200.0), "$1,200.00");
        assert_eq!(money(99.9), "$99.90");
    }
}
