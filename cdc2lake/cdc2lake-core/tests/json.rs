use std::str::FromStr;

use bigdecimal::BigDecimal;
use cdc2lake_core::{Record, Value};
use serde_json::json;

#[test]
fn debezium_row_maps_to_record() {
    let value = Value::from(json!({
        "id": 1,
        "ratio": 0.5,
        "name": "a",
        "flag": true,
        "gone": null,
        "amount": {"value": "MDk=", "scale": 2},
        "tags": ["x"],
    }));
    let record = Record::try_from(value).unwrap();

    assert_eq!(record.get("id"), Some(&Value::Int(1)));
    assert_eq!(record.get("ratio"), Some(&Value::Float(0.5)));
    assert_eq!(record.get("name"), Some(&Value::string("a")));
    assert_eq!(record.get("flag"), Some(&Value::Bool(true)));
    assert_eq!(record.get("gone"), Some(&Value::Null));
    assert!(matches!(record.get("amount"), Some(Value::Record(r)) if r.len() == 2));
    assert_eq!(record.get("tags"), Some(&Value::List(vec![Value::string("x")])));
}

#[test]
fn large_unsigned_numbers_stay_exact() {
    let value = Value::from(json!(u64::MAX));
    assert_eq!(value, Value::Decimal(BigDecimal::from(u64::MAX)));
}

#[test]
fn output_renders_decimals_and_bytes_as_text() {
    let record: Record = [
        ("amount", Value::Decimal(BigDecimal::from_str("-0.000000001").unwrap())),
        ("payload", Value::bytes([0xdeu8, 0xad])),
        ("nan", Value::Float(f64::NAN)),
        ("nested", Value::Record([("k", 1i64)].into_iter().collect())),
    ]
    .into_iter()
    .collect();

    assert_eq!(
        record.to_json(),
        json!({
            "amount": "-0.000000001",
            "payload": "3q0=",
            "nan": null,
            "nested": {"k": 1},
        })
    );
}
