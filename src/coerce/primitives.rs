#![deny(missing_docs)]

//! # Primitive Coercion
//!
//! The scalar coercion matrix: one function per primitive kind, each taking
//! a JSON value and either normalizing it or producing a single message
//! prefixed with the caller's field path.
//!
//! Format errors (`must be a valid double`) name the expected format only;
//! type-mismatch errors (`must be a string and not an object`) always name
//! the *runtime* kind of the offending value, never the declared type.

use crate::coerce::booleans;
use crate::spec::types::PrimitiveKind;
use regex::Regex;
use serde_json::{Number, Value as JsonValue};
use std::sync::OnceLock;
use uuid::Uuid;

/// The JSON runtime kind of a value, as used in error messages.
pub(crate) fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

/// Renders a kind with its indefinite article; `null` takes none.
pub(crate) fn with_article(kind: &str) -> String {
    match kind {
        "null" => "null".to_string(),
        // Vowel letter, consonant sound.
        "unit" => "a unit".to_string(),
        _ if kind.starts_with(['a', 'e', 'i', 'o', 'u']) => format!("an {}", kind),
        _ => format!("a {}", kind),
    }
}

/// The standard type-mismatch message.
pub(crate) fn type_mismatch(path: &str, expected: &str, actual: &JsonValue) -> String {
    format!(
        "{} must be {} and not {}",
        path,
        with_article(expected),
        with_article(json_kind(actual))
    )
}

/// Coerces a value against a primitive kind.
pub(crate) fn coerce_primitive(
    kind: PrimitiveKind,
    value: &JsonValue,
    path: &str,
) -> Result<JsonValue, String> {
    match kind {
        PrimitiveKind::String => coerce_string(value, path),
        PrimitiveKind::Boolean => coerce_boolean(value, path),
        PrimitiveKind::Integer => coerce_integer(value, path),
        PrimitiveKind::Long => coerce_long(value, path),
        PrimitiveKind::Double => coerce_float(value, path, "double"),
        PrimitiveKind::Decimal => coerce_float(value, path, "decimal"),
        PrimitiveKind::Uuid => coerce_uuid(value, path),
        PrimitiveKind::DateIso8601 => coerce_date(value, path),
        PrimitiveKind::DateTimeIso8601 => coerce_date_time(value, path),
        PrimitiveKind::Object => match value {
            JsonValue::Object(_) => Ok(value.clone()),
            other => Err(type_mismatch(path, "object", other)),
        },
        PrimitiveKind::Unit => match value {
            JsonValue::Null => Ok(JsonValue::Null),
            other => Err(type_mismatch(path, "unit", other)),
        },
    }
}

fn coerce_string(value: &JsonValue, path: &str) -> Result<JsonValue, String> {
    match value {
        JsonValue::String(_) => Ok(value.clone()),
        // Canonical decimal rendering: integers without a fractional part,
        // doubles with their fractional digits.
        JsonValue::Number(n) => Ok(JsonValue::String(n.to_string())),
        other => Err(type_mismatch(path, "string", other)),
    }
}

fn coerce_boolean(value: &JsonValue, path: &str) -> Result<JsonValue, String> {
    match value {
        JsonValue::Bool(_) => Ok(value.clone()),
        JsonValue::Number(n) => match n.as_f64() {
            Some(f) if f == 1.0 => Ok(JsonValue::Bool(true)),
            Some(f) if f == 0.0 => Ok(JsonValue::Bool(false)),
            _ => Err(type_mismatch(path, "boolean", value)),
        },
        JsonValue::String(s) => booleans::parse_literal(s)
            .map(JsonValue::Bool)
            .ok_or_else(|| type_mismatch(path, "boolean", value)),
        other => Err(type_mismatch(path, "boolean", other)),
    }
}

fn coerce_integer(value: &JsonValue, path: &str) -> Result<JsonValue, String> {
    integral(value)
        .and_then(|n| i32::try_from(n).ok())
        .map(|n| JsonValue::Number(Number::from(n)))
        .ok_or_else(|| format!("{} must be a valid integer", path))
}

fn coerce_long(value: &JsonValue, path: &str) -> Result<JsonValue, String> {
    integral(value)
        .map(|n| JsonValue::Number(Number::from(n)))
        .ok_or_else(|| format!("{} must be a valid long", path))
}

/// Extracts an integral value from a number (fractional part zero) or from
/// a string that parses as one.
fn integral(value: &JsonValue) -> Option<i64> {
    match value {
        JsonValue::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.is_finite())
                .filter(|f| *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                .map(|f| f as i64)
        }),
        JsonValue::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn coerce_float(value: &JsonValue, path: &str, kind: &str) -> Result<JsonValue, String> {
    let invalid = || format!("{} must be a valid {}", path, kind);
    match value {
        JsonValue::Number(_) => Ok(value.clone()),
        JsonValue::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Err(invalid());
            }
            // Integral literals normalize without a fractional part.
            if let Ok(n) = trimmed.parse::<i64>() {
                return Ok(JsonValue::Number(Number::from(n)));
            }
            trimmed
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .and_then(Number::from_f64)
                .map(JsonValue::Number)
                .ok_or_else(invalid)
        }
        _ => Err(invalid()),
    }
}

fn coerce_uuid(value: &JsonValue, path: &str) -> Result<JsonValue, String> {
    let invalid = || format!("{} must be a valid UUID", path);
    match value {
        JsonValue::String(s) => Uuid::parse_str(s)
            .map(|uuid| JsonValue::String(uuid.to_string()))
            .map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

/// `year-month-day` with a 1-4 digit year and 1-2 digit month and day.
fn date_pattern() -> &'static Regex {
    static DATE_RE: OnceLock<Regex> = OnceLock::new();
    DATE_RE.get_or_init(|| {
        Regex::new(r"^\d{1,4}-\d{1,2}-\d{1,2}$").expect("Invalid regex constant")
    })
}

/// Date, `T`, time with optional seconds and fraction, mandatory offset.
fn date_time_pattern() -> &'static Regex {
    static DATE_TIME_RE: OnceLock<Regex> = OnceLock::new();
    DATE_TIME_RE.get_or_init(|| {
        Regex::new(r"^\d{1,4}-\d{1,2}-\d{1,2}[Tt]\d{1,2}:\d{2}(:\d{2}(\.\d+)?)?([Zz]|[+-]\d{2}:?\d{2})$")
            .expect("Invalid regex constant")
    })
}

fn coerce_date(value: &JsonValue, path: &str) -> Result<JsonValue, String> {
    match value {
        // The original string is preserved verbatim, never reformatted.
        JsonValue::String(s) if date_pattern().is_match(s) => Ok(value.clone()),
        _ => Err(format!(
            "{} must be a valid ISO 8601 date. Example: '2017-07-24'",
            path
        )),
    }
}

fn coerce_date_time(value: &JsonValue, path: &str) -> Result<JsonValue, String> {
    match value {
        // A bare date is also a valid date-time.
        JsonValue::String(s)
            if date_time_pattern().is_match(s) || date_pattern().is_match(s) =>
        {
            Ok(value.clone())
        }
        _ => Err(format!(
            "{} must be a valid ISO 8601 datetime. Example: '2017-07-24T09:41:08+02:00'",
            path
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn coerce(kind: PrimitiveKind, value: JsonValue) -> Result<JsonValue, String> {
        coerce_primitive(kind, &value, "x")
    }

    #[test]
    fn string_accepts_numbers() {
        assert_eq!(
            coerce(PrimitiveKind::String, json!(123)),
            Ok(json!("123"))
        );
        assert_eq!(
            coerce(PrimitiveKind::String, json!(123.45)),
            Ok(json!("123.45"))
        );
        assert_eq!(
            coerce(PrimitiveKind::String, json!(true)),
            Err("x must be a string and not a boolean".to_string())
        );
    }

    #[test]
    fn string_mismatch_names_runtime_kind() {
        assert_eq!(
            coerce_primitive(PrimitiveKind::String, &json!({}), "x"),
            Err("x must be a string and not an object".to_string())
        );
        assert_eq!(
            coerce_primitive(PrimitiveKind::String, &JsonValue::Null, "x"),
            Err("x must be a string and not null".to_string())
        );
    }

    #[test]
    fn boolean_accepts_literals_and_bits() {
        assert_eq!(coerce(PrimitiveKind::Boolean, json!("Yes")), Ok(json!(true)));
        assert_eq!(coerce(PrimitiveKind::Boolean, json!("off")), Ok(json!(false)));
        assert_eq!(coerce(PrimitiveKind::Boolean, json!(1)), Ok(json!(true)));
        assert_eq!(coerce(PrimitiveKind::Boolean, json!(0)), Ok(json!(false)));
        assert_eq!(
            coerce(PrimitiveKind::Boolean, json!("maybe")),
            Err("x must be a boolean and not a string".to_string())
        );
        assert_eq!(
            coerce(PrimitiveKind::Boolean, json!(2)),
            Err("x must be a boolean and not a number".to_string())
        );
    }

    #[test]
    fn integer_and_long_bounds() {
        assert_eq!(coerce(PrimitiveKind::Integer, json!(5)), Ok(json!(5)));
        assert_eq!(coerce(PrimitiveKind::Integer, json!("42")), Ok(json!(42)));
        assert_eq!(coerce(PrimitiveKind::Integer, json!(2.0)), Ok(json!(2)));
        assert_eq!(
            coerce(PrimitiveKind::Integer, json!(3_000_000_000_i64)),
            Err("x must be a valid integer".to_string())
        );
        assert_eq!(
            coerce(PrimitiveKind::Long, json!(3_000_000_000_i64)),
            Ok(json!(3_000_000_000_i64))
        );
        assert_eq!(
            coerce(PrimitiveKind::Long, json!(1.5)),
            Err("x must be a valid long".to_string())
        );
    }

    #[test]
    fn double_accepts_numeric_strings_only() {
        assert_eq!(coerce(PrimitiveKind::Double, json!(1.5)), Ok(json!(1.5)));
        assert_eq!(coerce(PrimitiveKind::Double, json!("1.5")), Ok(json!(1.5)));
        assert_eq!(coerce(PrimitiveKind::Double, json!("2")), Ok(json!(2)));
        for bad in ["", "   ", "abc", "inf"] {
            assert_eq!(
                coerce(PrimitiveKind::Double, json!(bad)),
                Err("x must be a valid double".to_string())
            );
        }
        assert_eq!(
            coerce(PrimitiveKind::Decimal, json!("abc")),
            Err("x must be a valid decimal".to_string())
        );
    }

    #[test]
    fn uuid_normalizes_to_canonical_form() {
        assert_eq!(
            coerce(
                PrimitiveKind::Uuid,
                json!("9563CFF5-BDE8-4B36-B720-5E30C88CAFA8")
            ),
            Ok(json!("9563cff5-bde8-4b36-b720-5e30c88cafa8"))
        );
        assert_eq!(
            coerce(PrimitiveKind::Uuid, json!("not-a-uuid")),
            Err("x must be a valid UUID".to_string())
        );
    }

    #[test]
    fn dates_are_validated_but_preserved_verbatim() {
        assert_eq!(
            coerce(PrimitiveKind::DateIso8601, json!("2017-7-4")),
            Ok(json!("2017-7-4"))
        );
        assert_eq!(
            coerce(PrimitiveKind::DateIso8601, json!("2017-07-24T09:41:08Z")),
            Err("x must be a valid ISO 8601 date. Example: '2017-07-24'".to_string())
        );
        assert_eq!(
            coerce(
                PrimitiveKind::DateTimeIso8601,
                json!("2017-07-24T09:41:08+02:00")
            ),
            Ok(json!("2017-07-24T09:41:08+02:00"))
        );
        // A bare date is a valid datetime.
        assert_eq!(
            coerce(PrimitiveKind::DateTimeIso8601, json!("2017-07-24")),
            Ok(json!("2017-07-24"))
        );
        assert_eq!(
            coerce(PrimitiveKind::DateTimeIso8601, json!("09:41:08")),
            Err(
                "x must be a valid ISO 8601 datetime. Example: '2017-07-24T09:41:08+02:00'"
                    .to_string()
            )
        );
    }

    #[test]
    fn articles_match_the_kind() {
        assert_eq!(with_article("object"), "an object");
        assert_eq!(with_article("array"), "an array");
        assert_eq!(with_article("unit"), "a unit");
        assert_eq!(with_article("string"), "a string");
        assert_eq!(with_article("null"), "null");
    }

    #[test]
    fn unit_accepts_only_null() {
        assert_eq!(coerce(PrimitiveKind::Unit, JsonValue::Null), Ok(JsonValue::Null));
        assert_eq!(
            coerce(PrimitiveKind::Unit, json!({})),
            Err("x must be a unit and not an object".to_string())
        );
    }
}
