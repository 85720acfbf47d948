//! Error types for the conversion layer.

use crate::value::Value;

/// A value had a different variant than the caller required.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected}, found {actual}")]
pub struct ValueTypeError {
    pub expected: String,
    pub actual: &'static str,
}

impl ValueTypeError {
    pub fn new(expected: impl Into<String>, actual: &'static str) -> Self {
        Self {
            expected: expected.into(),
            actual,
        }
    }
}

/// A numeric field did not have the `{value, scale}` wire shape.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("malformed numeric value {value:?}: {reason}")]
pub struct MalformedNumericValue {
    /// The offending value, kept for diagnostics.
    pub value: Value,
    pub reason: String,
}

impl MalformedNumericValue {
    pub fn new(value: &Value, reason: impl Into<String>) -> Self {
        Self {
            value: value.clone(),
            reason: reason.into(),
        }
    }
}

/// Error returned by [`Converter`](crate::Converter) and
/// [`RecordConverter`](crate::RecordConverter) operations.
///
/// Every variant is fatal for the record being converted.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// A field required by the record contract is absent (or null where a
    /// value is mandatory).
    #[error("required field '{field}' is missing")]
    MissingField { field: String },

    /// A numeric field could not be decoded.
    #[error("numeric field '{field}' is malformed: {source}")]
    MalformedNumeric {
        field: String,
        #[source]
        source: MalformedNumericValue,
    },

    /// A binary payload field was not valid base64 text.
    #[error("binary field '{field}' is not valid base64: {source}")]
    MalformedBinaryField {
        field: String,
        #[source]
        source: base64::DecodeError,
    },

    /// A field had an unexpected value type.
    #[error("field '{field}' has unexpected type: {source}")]
    ValueType {
        field: String,
        #[source]
        source: ValueTypeError,
    },

    /// The record timestamp cannot be represented as a calendar date.
    #[error("timestamp {timestamp} is out of the supported date range")]
    TimestampOutOfRange { timestamp: i64 },
}
