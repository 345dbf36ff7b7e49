//! Typed scalar values and the field kinds that coerce raw query strings into them

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use std::cmp::Ordering;

use crate::value_objects::RecordId;

/// How a schema field stores its values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Boolean,
    DateTime,
    Id,
    /// Nested object (audit attribution). Projectable, never filterable.
    Embedded,
}

impl FieldKind {
    /// Coerce a raw, already percent-decoded value. `null` is accepted for every kind.
    pub fn coerce(self, raw: &str) -> Option<Scalar> {
        if raw == "null" {
            return Some(Scalar::Null);
        }
        match self {
            Self::Text => Some(Scalar::Text(raw.to_string())),
            Self::Integer => raw.trim().parse().ok().map(Scalar::Int),
            Self::Boolean => match raw.trim() {
                "true" => Some(Scalar::Bool(true)),
                "false" => Some(Scalar::Bool(false)),
                _ => None,
            },
            Self::DateTime => parse_datetime(raw).map(Scalar::DateTime),
            Self::Id => RecordId::parse(raw).ok().map(Scalar::Id),
            Self::Embedded => None,
        }
    }

    #[inline]
    pub fn is_filterable(self) -> bool {
        !matches!(self, Self::Embedded)
    }
}

/// Parse an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (midnight UTC)
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// A coerced filter operand
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Text(String),
    DateTime(DateTime<Utc>),
    Id(RecordId),
}

impl Scalar {
    /// Order a stored document value relative to this operand.
    ///
    /// Returns `None` when the two are not comparable (kind mismatch, missing value).
    pub fn compare(&self, value: &Value) -> Option<Ordering> {
        match (self, value) {
            (Self::Null, Value::Null) => Some(Ordering::Equal),
            (Self::Bool(expected), Value::Bool(actual)) => Some(actual.cmp(expected)),
            (Self::Int(expected), Value::Number(actual)) => match actual.as_i64() {
                Some(actual) => Some(actual.cmp(expected)),
                None => actual.as_f64()?.partial_cmp(&(*expected as f64)),
            },
            (Self::Text(expected), Value::String(actual)) => Some(actual.as_str().cmp(expected)),
            (Self::DateTime(expected), Value::String(actual)) => {
                let actual = DateTime::parse_from_rfc3339(actual).ok()?;
                Some(actual.with_timezone(&Utc).cmp(expected))
            }
            (Self::Id(expected), Value::String(actual)) => {
                Some(RecordId::parse(actual).ok()?.cmp(expected))
            }
            // A populated relation still compares by its id
            (Self::Id(_), Value::Object(related)) => self.compare(related.get("id")?),
            _ => None,
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_by_kind() {
        assert_eq!(FieldKind::Integer.coerce("42"), Some(Scalar::Int(42)));
        assert_eq!(FieldKind::Integer.coerce("forty"), None);
        assert_eq!(FieldKind::Boolean.coerce("true"), Some(Scalar::Bool(true)));
        assert_eq!(FieldKind::Boolean.coerce("yes"), None);
        assert_eq!(FieldKind::Text.coerce("hello"), Some(Scalar::Text("hello".into())));
        assert_eq!(FieldKind::Id.coerce("nope"), None);
        assert_eq!(FieldKind::Embedded.coerce("x"), None);
        assert_eq!(FieldKind::DateTime.coerce("null"), Some(Scalar::Null));
    }

    #[test]
    fn test_parse_datetime_formats() {
        let day = parse_datetime("2024-03-01").unwrap();
        assert_eq!(day.to_rfc3339(), "2024-03-01T00:00:00+00:00");

        let ts = parse_datetime("2024-03-01T12:30:00+02:00").unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-03-01T10:30:00+00:00");

        assert!(parse_datetime("not-a-date").is_none());
        assert!(parse_datetime("2024-13-45").is_none());
    }

    #[test]
    fn test_compare_datetime_strings() {
        let pivot = Scalar::DateTime(parse_datetime("2024-01-01").unwrap());
        assert_eq!(
            pivot.compare(&json!("2024-06-01T00:00:00Z")),
            Some(Ordering::Greater)
        );
        assert_eq!(
            pivot.compare(&json!("2023-06-01T00:00:00Z")),
            Some(Ordering::Less)
        );
        assert_eq!(pivot.compare(&json!(12)), None);
    }

    #[test]
    fn test_compare_id_against_populated_relation() {
        let id = RecordId::new();
        let scalar = Scalar::Id(id);
        assert_eq!(
            scalar.compare(&json!({ "id": id.to_string(), "name": "x" })),
            Some(Ordering::Equal)
        );
    }
}
