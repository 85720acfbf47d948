//! Bridging between [`Value`] and `serde_json` documents.
//!
//! Input follows the Debezium JSON converter: numbers become `Int` when they
//! fit in an `i64` and `Float` otherwise, objects become nested records.
//! Output keeps decimals exact by rendering them as strings and renders byte
//! payloads as base64 text.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use bigdecimal::BigDecimal;
use serde_json::{Map, Number, Value as JsonValue};

use crate::{record::Record, value::Value};

impl From<JsonValue> for Value {
    fn from(json: JsonValue) -> Self {
        match json {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(v) => Value::Bool(v),
            JsonValue::Number(n) => number_to_value(&n),
            JsonValue::String(s) => Value::from(s),
            JsonValue::Array(items) => Value::List(items.into_iter().map(Value::from).collect()),
            JsonValue::Object(fields) => Value::Record(Record::from(fields)),
        }
    }
}

impl From<Map<String, JsonValue>> for Record {
    fn from(fields: Map<String, JsonValue>) -> Self {
        fields.into_iter().collect()
    }
}

fn number_to_value(n: &Number) -> Value {
    if let Some(v) = n.as_i64() {
        return Value::Int(v);
    }
    // u64 beyond i64::MAX stays exact as a decimal.
    if let Some(v) = n.as_u64() {
        return Value::Decimal(BigDecimal::from(v));
    }
    n.as_f64().map_or(Value::Null, Value::Float)
}

impl Value {
    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Null => JsonValue::Null,
            Value::Bool(v) => JsonValue::Bool(*v),
            Value::Int(v) => JsonValue::from(*v),
            Value::Float(v) => Number::from_f64(*v).map_or(JsonValue::Null, JsonValue::Number),
            Value::String(s) => JsonValue::String(s.to_string()),
            Value::Bytes(b) => JsonValue::String(STANDARD.encode(b)),
            Value::Decimal(d) => JsonValue::String(d.to_plain_string()),
            Value::List(items) => JsonValue::Array(items.iter().map(Value::to_json).collect()),
            Value::Record(record) => record.to_json(),
        }
    }
}

impl Record {
    pub fn to_json(&self) -> JsonValue {
        JsonValue::Object(
            self.iter()
                .map(|(k, v)| (k.to_string(), v.to_json()))
                .collect(),
        )
    }
}
