//! File Record
//!
//! The typed view of one metadata entry, and the schema check that turns an
//! untyped entry into one.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::error::{FileShareError, Result};

use super::RawEntry;

/// Metadata for one uploaded file
///
/// Created exactly once, at upload, and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    /// Generated identifier, also the blob's filename
    pub id: String,

    /// Name supplied by the client (free-form, not sanitized)
    pub file_name: String,

    /// Content length in bytes
    pub size: u64,

    /// Upload time (serialized as RFC 3339)
    pub timestamp: DateTime<Utc>,
}

/// Outcome of checking a raw entry against the FileRecord schema
#[derive(Debug, Clone, PartialEq)]
pub enum Validation {
    /// All fields present and well-typed
    Valid(FileRecord),

    /// A required field is absent
    MissingField(&'static str),

    /// A field is present but has the wrong shape
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
}

impl Validation {
    /// Collapse to a record, dropping anything invalid
    ///
    /// This is the only place a corrupt entry is discarded. Listing and lookup
    /// both go through here, so a malformed entry behaves as if it had never
    /// been written.
    pub fn into_record(self) -> Option<FileRecord> {
        match self {
            Validation::Valid(record) => Some(record),
            Validation::MissingField(field) => {
                tracing::debug!("Dropping metadata entry: missing field `{}`", field);
                None
            }
            Validation::WrongType { field, expected } => {
                tracing::debug!(
                    "Dropping metadata entry: field `{}` is not {}",
                    field,
                    expected
                );
                None
            }
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid(_))
    }
}

impl FileRecord {
    /// Create a record stamped with the current time
    pub fn new(id: impl Into<String>, file_name: impl Into<String>, size: u64) -> Self {
        Self {
            id: id.into(),
            file_name: file_name.into(),
            size,
            timestamp: Utc::now(),
        }
    }

    /// Check a raw entry against the schema
    ///
    /// No coercion: `"size": "100"` is a wrong type, not 100. Unknown extra
    /// fields are ignored.
    pub fn validate(entry: &RawEntry) -> Validation {
        let Some(object) = entry.as_object() else {
            return Validation::WrongType {
                field: "entry",
                expected: "object",
            };
        };

        let id = match string_field(object, "id") {
            Ok(v) => v,
            Err(outcome) => return outcome,
        };
        let file_name = match string_field(object, "file_name") {
            Ok(v) => v,
            Err(outcome) => return outcome,
        };

        let size = match object.get("size") {
            None => return Validation::MissingField("size"),
            Some(v) => match v.as_u64() {
                Some(size) => size,
                None => {
                    return Validation::WrongType {
                        field: "size",
                        expected: "a non-negative integer",
                    }
                }
            },
        };

        let timestamp = match object.get("timestamp") {
            None => return Validation::MissingField("timestamp"),
            Some(v) => match timestamp_value(v) {
                Some(ts) => ts,
                None => {
                    return Validation::WrongType {
                        field: "timestamp",
                        expected: "an ISO-8601 date-time or Unix time",
                    }
                }
            },
        };

        Validation::Valid(FileRecord {
            id: id.to_string(),
            file_name: file_name.to_string(),
            size,
            timestamp,
        })
    }

    /// Convert to the untyped form stored in the metadata document
    pub fn to_entry(&self) -> Result<RawEntry> {
        serde_json::to_value(self).map_err(|e| FileShareError::Serialization(e.to_string()))
    }
}

fn string_field<'a>(
    object: &'a serde_json::Map<String, Value>,
    field: &'static str,
) -> std::result::Result<&'a str, Validation> {
    match object.get(field) {
        None => Err(Validation::MissingField(field)),
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(_) => Err(Validation::WrongType {
            field,
            expected: "a string",
        }),
    }
}

/// Interpret a stored timestamp: a date-time string or a Unix time number
fn timestamp_value(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(raw) => parse_timestamp(raw),
        Value::Number(n) => n.as_f64().and_then(from_unix),
        _ => None,
    }
}

/// Parse an upload timestamp
///
/// Accepts RFC 3339, date-times with or without seconds and with or without
/// an offset (`T` or space separator). Values without an offset are UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    const WITH_OFFSET: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f%:z",
        "%Y-%m-%d %H:%M:%S%.f%:z",
        "%Y-%m-%dT%H:%M%:z",
        "%Y-%m-%d %H:%M%:z",
    ];
    if let Some(ts) = WITH_OFFSET
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(ts.with_timezone(&Utc));
    }

    const NAIVE: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    let naive = raw
        .strip_suffix('Z')
        .or_else(|| raw.strip_suffix('z'))
        .unwrap_or(raw);
    NAIVE
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(naive, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Unix time in seconds, or milliseconds past 2e10
fn from_unix(value: f64) -> Option<DateTime<Utc>> {
    if !value.is_finite() {
        return None;
    }

    let secs = if value.abs() > 2e10 { value / 1000.0 } else { value };
    let whole = secs.floor();
    let nanos = (((secs - whole) * 1e9).round() as u32).min(999_999_999);
    DateTime::from_timestamp(whole as i64, nanos)
}
