//! Lossy numeric parsing for legacy catalog values.
//!
//! Legacy documents store prices as currency strings (`"25 000$"`),
//! percentages as `"NN%"` and quantities as free text (`"15 unités"`).
//! None of these parsers validate their input: anything that is not a digit
//! is discarded.

use serde_json::Value as JsonValue;

/// Strips every non-digit character and parses the remainder as base 10.
///
/// Returns `None` when nothing numeric is left or the digits overflow.
pub fn parse_price_str(raw: &str) -> Option<u64> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Price rule applied to a JSON value: integers pass through, strings go
/// through [`parse_price_str`], anything else is absent.
pub fn parse_price(value: Option<&JsonValue>) -> Option<u64> {
    match value? {
        JsonValue::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.round() as u64)),
        JsonValue::String(s) => parse_price_str(s),
        _ => None,
    }
}

/// First run of ASCII digits in `raw`, parsed as an integer.
pub fn extract_number_str(raw: &str) -> Option<i64> {
    let start = raw.find(|c: char| c.is_ascii_digit())?;
    let run = &raw[start..];
    let end = run
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(run.len());
    run[..end].parse().ok()
}

/// Numbers pass through (fractions truncated), strings yield their first
/// run of digits, everything else is absent.
pub fn extract_number(value: Option<&JsonValue>) -> Option<i64> {
    match value? {
        JsonValue::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        JsonValue::String(s) => extract_number_str(s),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{extract_number, extract_number_str, parse_price, parse_price_str};

    #[test]
    fn extract_number_takes_first_digit_run() {
        assert_eq!(extract_number(Some(&json!("15 unités"))), Some(15));
        assert_eq!(extract_number_str("lot de 3 x 20"), Some(3));
        assert_eq!(extract_number(Some(&json!(7))), Some(7));
        assert_eq!(extract_number(None), None);
        assert_eq!(extract_number(Some(&json!(null))), None);
        assert_eq!(extract_number(Some(&json!("aucun"))), None);
    }

    #[test]
    fn parse_price_discards_separators_and_symbols() {
        assert_eq!(parse_price(Some(&json!("25 000$"))), Some(25_000));
        assert_eq!(parse_price_str("1,250,000 $"), Some(1_250_000));
        assert_eq!(parse_price(Some(&json!("15%"))), Some(15));
        assert_eq!(parse_price(Some(&json!(4200))), Some(4200));
        assert_eq!(parse_price(None), None);
        assert_eq!(parse_price(Some(&json!(""))), None);
        assert_eq!(parse_price(Some(&json!("sur demande"))), None);
    }

    #[test]
    fn parse_price_rejects_overflowing_digit_runs() {
        assert_eq!(parse_price_str("99999999999999999999999"), None);
    }
}
