//! Decoding of fixed-point `{value, scale}` numerics into exact decimals.
//!
//! Debezium emits `NUMERIC`/`DECIMAL` columns in precise mode as a record
//! holding the unscaled integer as base64 big-endian two's-complement bytes
//! and the decimal scale. The decoded value is `unscaled / 10^scale`, built
//! directly as a [`BigDecimal`] so no digit is ever lost.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use bigdecimal::{BigDecimal, num_bigint::BigInt};

use crate::{error::MalformedNumericValue, record::Record, value::Value};

/// Key holding the base64 unscaled integer.
pub const VALUE_KEY: &str = "value";
/// Key holding the decimal scale.
pub const SCALE_KEY: &str = "scale";
/// Largest accepted scale, the maximum number of fractional digits a
/// PostgreSQL `NUMERIC` can hold.
pub const MAX_SCALE: i64 = 16_383;

/// Decode a fixed-point encoded value.
///
/// `Null` passes through as `Ok(None)`. Anything other than a record with
/// exactly the keys `value` (base64 string) and `scale` (integer in
/// `0..=MAX_SCALE`) is rejected.
pub fn decode_numeric(encoded: &Value) -> Result<Option<BigDecimal>, MalformedNumericValue> {
    let fields = match encoded {
        Value::Null => return Ok(None),
        Value::Record(fields) => fields,
        _ => {
            return Err(MalformedNumericValue::new(
                encoded,
                format!("expected a {{value, scale}} record, found {}", encoded.variant_name()),
            ));
        }
    };

    let (Some(value), Some(scale), 2) = (fields.get(VALUE_KEY), fields.get(SCALE_KEY), fields.len())
    else {
        return Err(MalformedNumericValue::new(
            encoded,
            "expected exactly the keys `value` and `scale`",
        ));
    };
    let Value::String(digits) = value else {
        return Err(MalformedNumericValue::new(encoded, "`value` must be a base64 string"));
    };
    let scale = match scale {
        Value::Int(scale) if *scale >= 0 => *scale,
        _ => {
            return Err(MalformedNumericValue::new(
                encoded,
                "`scale` must be a non-negative integer",
            ));
        }
    };
    if scale > MAX_SCALE {
        return Err(MalformedNumericValue::new(
            encoded,
            format!("`scale` {scale} exceeds the maximum of {MAX_SCALE}"),
        ));
    }

    let raw = STANDARD
        .decode(digits.as_bytes())
        .map_err(|e| MalformedNumericValue::new(encoded, format!("`value` is not base64: {e}")))?;
    let unscaled = BigInt::from_signed_bytes_be(&raw);
    Ok(Some(BigDecimal::new(unscaled, scale)))
}

/// Encode a decimal into its `{value, scale}` wire form.
///
/// Decimals with a negative exponent (e.g. `1E+3`) are expanded to scale 0.
pub fn encode_numeric(decimal: &BigDecimal) -> Value {
    let (mut unscaled, mut scale) = decimal.as_bigint_and_exponent();
    if scale < 0 {
        (unscaled, scale) = decimal.with_scale(0).into_bigint_and_exponent();
    }
    let record: Record = [
        (VALUE_KEY, Value::string(STANDARD.encode(unscaled.to_signed_bytes_be()))),
        (SCALE_KEY, Value::Int(scale)),
    ]
    .into_iter()
    .collect();
    Value::Record(record)
}

/// A record field carrying a fixed-point encoded value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericField {
    pub name: String,
    /// Drop the fractional part, leaving an integral decimal.
    pub is_integer: bool,
    /// Render the decoded decimal as its exact decimal string.
    pub as_string: bool,
}

impl NumericField {
    pub fn new(name: impl Into<String>, is_integer: bool, as_string: bool) -> Self {
        Self {
            name: name.into(),
            is_integer,
            as_string,
        }
    }

    /// A plain decimal field, kept at its wire scale.
    pub fn decimal(name: impl Into<String>) -> Self {
        Self::new(name, false, false)
    }

    /// Decode `encoded` and render it according to this descriptor.
    pub fn apply(&self, encoded: &Value) -> Result<Value, MalformedNumericValue> {
        let Some(decimal) = decode_numeric(encoded)? else {
            return Ok(Value::Null);
        };
        let decimal = if self.is_integer {
            decimal.with_scale(0)
        } else {
            decimal
        };
        Ok(if self.as_string {
            Value::string(decimal.to_plain_string())
        } else {
            Value::Decimal(decimal)
        })
    }
}
