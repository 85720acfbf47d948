use base64::{Engine as _, engine::general_purpose::STANDARD};
use cdc2lake_boc::extract_comment;
use cdc2lake_core::{ConvertError, Value};

/// Raw bytes of a binary payload column.
///
/// Debezium ships `bytea` columns as base64 text; rows that were already
/// decoded carry the bytes directly. `Null` yields `None`.
pub(crate) fn decode_payload(field: &str, value: &Value) -> Result<Option<Vec<u8>>, ConvertError> {
    match value {
        Value::Null => Ok(None),
        Value::Bytes(bytes) => Ok(Some(bytes.to_vec())),
        Value::String(text) => STANDARD
            .decode(text.as_bytes())
            .map(Some)
            .map_err(|source| ConvertError::MalformedBinaryField {
                field: field.to_string(),
                source,
            }),
        other => Err(ConvertError::ValueType {
            field: field.to_string(),
            source: other.type_mismatch("base64 String or Bytes"),
        }),
    }
}

/// Text comment of a serialized cell payload, if it carries one.
pub(crate) fn comment_of(payload: Option<&[u8]>) -> Option<String> {
    payload.and_then(extract_comment)
}
