//! Rating coercion.
//!
//! Clients send `rating` as a number or a string. Integer-prefix parsing is
//! applied: leading whitespace is skipped, an optional sign is read, then
//! digits up to the first non-digit. Input with no leading digits is not
//! rejected; it yields [`Rating::NotANumber`].

use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    Value(i64),
    NotANumber,
}

impl Rating {
    /// Stored form; the sentinel has no integer representation and is dropped.
    pub fn stored(self) -> Option<i64> {
        match self {
            Rating::Value(v) => Some(v),
            Rating::NotANumber => None,
        }
    }
}

pub fn coerce(value: &Value) -> Rating {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Rating::Value(i)
            } else if let Some(u) = n.as_u64() {
                Rating::Value(i64::try_from(u).unwrap_or(i64::MAX))
            } else {
                match n.as_f64() {
                    // float-to-int `as` saturates
                    Some(f) if f.is_finite() => Rating::Value(f.trunc() as i64),
                    _ => Rating::NotANumber,
                }
            }
        }
        Value::String(s) => parse_int_prefix(s),
        _ => Rating::NotANumber,
    }
}

fn parse_int_prefix(s: &str) -> Rating {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, digits) = match rest.get(..2) {
        Some("0x") | Some("0X") => (16, &rest[2..]),
        _ => (10, rest),
    };

    let mut acc: i64 = 0;
    let mut seen = false;
    for c in digits.chars() {
        let Some(d) = c.to_digit(radix) else { break };
        seen = true;
        acc = acc.saturating_mul(i64::from(radix)).saturating_add(i64::from(d));
    }
    if !seen {
        return Rating::NotANumber;
    }
    Rating::Value(if negative { acc.saturating_neg() } else { acc })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integers_pass_through() {
        assert_eq!(coerce(&json!(5)), Rating::Value(5));
        assert_eq!(coerce(&json!(-2)), Rating::Value(-2));
    }

    #[test]
    fn floats_truncate_toward_zero() {
        assert_eq!(coerce(&json!(4.7)), Rating::Value(4));
        assert_eq!(coerce(&json!(-4.7)), Rating::Value(-4));
    }

    #[test]
    fn strings_use_leading_digits() {
        assert_eq!(coerce(&json!("8")), Rating::Value(8));
        assert_eq!(coerce(&json!("  12abc")), Rating::Value(12));
        assert_eq!(coerce(&json!("-3")), Rating::Value(-3));
        assert_eq!(coerce(&json!("+7")), Rating::Value(7));
        assert_eq!(coerce(&json!("3.9")), Rating::Value(3));
        assert_eq!(coerce(&json!("0x1A")), Rating::Value(26));
    }

    #[test]
    fn non_numeric_yields_sentinel() {
        assert_eq!(coerce(&json!("abc")), Rating::NotANumber);
        assert_eq!(coerce(&json!("")), Rating::NotANumber);
        assert_eq!(coerce(&json!("-")), Rating::NotANumber);
        assert_eq!(coerce(&json!(true)), Rating::NotANumber);
        assert_eq!(coerce(&json!(null)), Rating::NotANumber);
        assert_eq!(coerce(&json!([1])), Rating::NotANumber);
    }

    #[test]
    fn huge_values_saturate() {
        assert_eq!(coerce(&json!("99999999999999999999999")), Rating::Value(i64::MAX));
        assert_eq!(coerce(&json!(u64::MAX)), Rating::Value(i64::MAX));
    }

    #[test]
    fn sentinel_is_not_stored() {
        assert_eq!(Rating::NotANumber.stored(), None);
        assert_eq!(Rating::Value(3).stored(), Some(3));
    }
}
