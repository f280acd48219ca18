//! Lenient float parsing for form-submitted quantities
//!
//! Browsers post quantities as text, and clients sometimes append units
//! (`"12kg"`). [`parse_float`] takes the longest numeric prefix after
//! leading whitespace and yields `NaN` when there is none.

use serde_json::Value;

/// Parse a quantity from a raw JSON value
///
/// - numbers are used as is
/// - strings go through [`parse_float`]
/// - every other type (including missing and null) yields `NaN`
pub fn quantity_from_value(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => parse_float(s),
        _ => f64::NAN,
    }
}

/// Parse the longest leading decimal literal of `input`
///
/// Accepts an optional sign, digits with an optional fraction, an optional
/// exponent, or the literal `Infinity`. Trailing garbage is ignored.
pub fn parse_float(input: &str) -> f64 {
    let s = input.trim_start_matches(is_js_whitespace);
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    if s[end..].starts_with("Infinity") {
        let negative = bytes.first() == Some(&b'-');
        return if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return f64::NAN;
    }

    // Exponent only counts when at least one digit follows it.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().unwrap_or(f64::NAN)
}

/// ECMAScript `WhiteSpace` and `LineTerminator` code points
///
/// Differs from [`char::is_whitespace`]: U+FEFF counts, U+0085 and the
/// U+001C..=U+001F separators do not.
fn is_js_whitespace(c: char) -> bool {
    matches!(
        c,
        '\u{0009}'
            | '\u{000A}'
            | '\u{000B}'
            | '\u{000C}'
            | '\u{000D}'
            | '\u{0020}'
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_numbers() {
        assert_eq!(parse_float("1"), 1.0);
        assert_eq!(parse_float("0.5"), 0.5);
        assert_eq!(parse_float("-3"), -3.0);
        assert_eq!(parse_float("+7.25"), 7.25);
    }

    #[test]
    fn test_leading_whitespace_and_trailing_garbage() {
        assert_eq!(parse_float("  42"), 42.0);
        assert_eq!(parse_float("12kg"), 12.0);
        assert_eq!(parse_float("3.5 bags"), 3.5);
        assert_eq!(parse_float("1.2.3"), 1.2);
    }

    #[test]
    fn test_leading_whitespace_set() {
        assert_eq!(parse_float("\t\n\r 8"), 8.0);
        assert_eq!(parse_float("\u{FEFF}12"), 12.0);
        assert_eq!(parse_float("\u{00A0}\u{3000}\u{2028}5"), 5.0);
        assert!(parse_float("\u{0085}12").is_nan());
        assert!(parse_float("\u{001F}12").is_nan());
    }

    #[test]
    fn test_partial_decimal_forms() {
        assert_eq!(parse_float(".5"), 0.5);
        assert_eq!(parse_float("5."), 5.0);
        assert!(parse_float(".").is_nan());
        assert!(parse_float("-.").is_nan());
    }

    #[test]
    fn test_exponents() {
        assert_eq!(parse_float("1e3"), 1000.0);
        assert_eq!(parse_float("2.5E-1"), 0.25);
        assert_eq!(parse_float("4e"), 4.0);
        assert_eq!(parse_float("4e+"), 4.0);
    }

    #[test]
    fn test_infinity() {
        assert_eq!(parse_float("Infinity"), f64::INFINITY);
        assert_eq!(parse_float("-Infinityx"), f64::NEG_INFINITY);
        assert!(parse_float("infinity").is_nan());
    }

    #[test]
    fn test_non_numeric_is_nan() {
        assert!(parse_float("").is_nan());
        assert!(parse_float("   ").is_nan());
        assert!(parse_float("abc").is_nan());
        assert!(parse_float("kg12").is_nan());
        assert!(parse_float("-").is_nan());
    }

    #[test]
    fn test_quantity_from_value() {
        assert_eq!(quantity_from_value(Some(&json!(10))), 10.0);
        assert_eq!(quantity_from_value(Some(&json!(0.5))), 0.5);
        assert_eq!(quantity_from_value(Some(&json!("15"))), 15.0);
        assert!(quantity_from_value(None).is_nan());
        assert!(quantity_from_value(Some(&json!(null))).is_nan());
        assert!(quantity_from_value(Some(&json!(true))).is_nan());
        assert!(quantity_from_value(Some(&json!({ "kg": 5 }))).is_nan());
    }
}
