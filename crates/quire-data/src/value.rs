//! Truthiness, equality and display of data leaves.
//!
//! Content authors write filter directives against JSON-like data, so the
//! comparisons here follow the loose rules of that world: `0`, `""`, `false`
//! and `null` are falsy, and `"1" == 1` holds under [`loose_eq`].

use serde_json::Value;

/// Whether a value counts as "present".
///
/// `null`, `false`, `0`, `NaN` and the empty string are falsy. Arrays and
/// objects are always truthy, even when empty.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// [`is_truthy`] for an optional lookup result; a missing value is falsy.
#[must_use]
pub fn opt_truthy(value: Option<&Value>) -> bool {
    value.is_some_and(is_truthy)
}

/// Strict equality with numeric normalization (`1 == 1.0`).
#[must_use]
pub fn strict_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}

/// Coercing equality.
///
/// - `null` only equals `null`
/// - numbers and numeric strings compare as numbers (`"" == 0`)
/// - booleans compare as `0`/`1`
/// - arrays and objects against scalars compare by their text form
/// - two composite values compare structurally
#[must_use]
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Number(_), Value::Number(_)) => strict_eq(a, b),
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Bool(x), other) | (other, Value::Bool(x)) => {
            loose_eq(&Value::from(u8::from(*x)), other)
        }
        (Value::Number(n), Value::String(s)) | (Value::String(s), Value::Number(n)) => {
            n.as_f64() == Some(string_to_number(s))
        }
        (composite @ (Value::Array(_) | Value::Object(_)), scalar)
        | (scalar, composite @ (Value::Array(_) | Value::Object(_)))
            if !scalar.is_array() && !scalar.is_object() =>
        {
            loose_eq(&Value::String(primitive_text(composite)), scalar)
        }
        _ => a == b,
    }
}

/// Numeric value of a string under loose comparison; unparsable text is `NaN`.
fn string_to_number(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse().unwrap_or(f64::NAN)
}

/// Text form of a composite when compared against a scalar.
fn primitive_text(value: &Value) -> String {
    match value {
        Value::Array(items) => items
            .iter()
            .map(primitive_text)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_owned(),
        other => display(other),
    }
}

/// Render a value as display text.
///
/// Strings are returned as-is, `null` is empty, arrays are joined with `", "`
/// and objects are printed as compact JSON.
#[must_use]
pub fn display(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items.iter().map(display).collect::<Vec<_>>().join(", "),
        Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!("0")));
        assert!(is_truthy(&json!(-1)));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
    }

    #[test]
    fn test_opt_truthy_missing() {
        assert!(!opt_truthy(None));
        assert!(opt_truthy(Some(&json!(true))));
    }

    #[test]
    fn test_loose_eq_number_string() {
        assert!(loose_eq(&json!(1), &json!("1")));
        assert!(loose_eq(&json!("2.5"), &json!(2.5)));
        assert!(loose_eq(&json!(0), &json!("")));
        assert!(!loose_eq(&json!(1), &json!("one")));
    }

    #[test]
    fn test_loose_eq_bool() {
        assert!(loose_eq(&json!(true), &json!(1)));
        assert!(loose_eq(&json!("1"), &json!(true)));
        assert!(loose_eq(&json!(false), &json!("0")));
        assert!(!loose_eq(&json!(true), &json!("true")));
    }

    #[test]
    fn test_loose_eq_null() {
        assert!(loose_eq(&json!(null), &json!(null)));
        assert!(!loose_eq(&json!(null), &json!(0)));
        assert!(!loose_eq(&json!(""), &json!(null)));
    }

    #[test]
    fn test_loose_eq_array_scalar() {
        assert!(loose_eq(&json!(["a"]), &json!("a")));
        assert!(loose_eq(&json!([1, 2]), &json!("1,2")));
    }

    #[test]
    fn test_strict_eq_numeric_normalization() {
        assert!(strict_eq(&json!(1), &json!(1.0)));
        assert!(!strict_eq(&json!(1), &json!("1")));
    }

    #[test]
    fn test_display() {
        assert_eq!(display(&json!("text")), "text");
        assert_eq!(display(&json!(null)), "");
        assert_eq!(display(&json!(42)), "42");
        assert_eq!(display(&json!(["a", "b"])), "a, b");
        assert_eq!(display(&json!({"k": 1})), r#"{"k":1}"#);
    }
}
