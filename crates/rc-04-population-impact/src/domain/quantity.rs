//! Free-text quantity parsing.

/// Value of the leading numeric token of `text`, or 0 when there is none.
///
/// Thousands separators are skipped and a single decimal point is honoured:
/// `"100 hectares"` → 100, `"1,250.5 ha"` → 1250.5, `"about 40 ha"` → 0.
pub fn leading_quantity(text: &str) -> f64 {
    let mut token = String::new();
    let mut seen_point = false;

    for c in text.trim_start().chars() {
        match c {
            '0'..='9' => token.push(c),
            ',' if !token.is_empty() && !seen_point => {}
            '.' if !seen_point => {
                seen_point = true;
                token.push(c);
            }
            _ => break,
        }
    }

    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_suffix() {
        assert_eq!(leading_quantity("100 hectares"), 100.0);
        assert_eq!(leading_quantity("  12.5ha"), 12.5);
    }

    #[test]
    fn test_thousands_separator() {
        assert_eq!(leading_quantity("1,250.5 ha"), 1250.5);
    }

    #[test]
    fn test_no_leading_number() {
        assert_eq!(leading_quantity("about 40 ha"), 0.0);
        assert_eq!(leading_quantity(""), 0.0);
        assert_eq!(leading_quantity("."), 0.0);
        assert_eq!(leading_quantity(",300"), 0.0);
    }

    #[test]
    fn test_second_point_ends_token() {
        assert_eq!(leading_quantity("3.5.1 acres"), 3.5);
    }
}
