
use cdc2lake_avro::SchemaLoadError;
use cdc2lake_core::{ConvertError, RecordConverter, Value};
use cdc2lake_ton::{MessageConverter, MessageWithDataConverter};
use test_helpers::*;

fn schema_dir() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/schemas")
}

#[test]
fn message_extracts_comment_and_drops_payloads() {
    let converter = MessageConverter::new().unwrap();
    let row = message_row(comment_body("thanks for lunch"), b64(b"state"));

    let out = converter.convert(row, None).unwrap();
    assert_eq!(out.get("comment"), Some(&Value::string("thanks for lunch")));
    assert!(!out.contains("body_boc"));
    assert!(!out.contains("init_state_boc"));
    assert_eq!(out.get("value"), Some(&Value::Int(1_000_000_000)));
    assert!(converter.base().undeclared_fields(&out).is_empty());
}

#[test]
fn message_comment_strips_nul_characters() {
    let converter = MessageConverter::new().unwrap();
    let out = converter
        .convert(message_row(comment_body("a\0b"), Value::Null), None)
        .unwrap();
    assert_eq!(out.get("comment"), Some(&Value::string("ab")));
}

#[test]
fn message_unparsable_body_gives_null_comment() {
    let converter = MessageConverter::new().unwrap();

    for body in [b64(b"garbage"), Value::string("%%%not base64"), Value::Null] {
        let out = converter.convert(message_row(body, Value::Null), None).unwrap();
        assert_eq!(out.get("comment"), Some(&Value::Null));
        assert!(!out.contains("body_boc"));
    }
}

#[test]
fn message_without_body_key_is_rejected() {
    let converter = MessageConverter::new().unwrap();
    let mut row = message_row(Value::Null, Value::Null);
    row.remove("body_boc");

    assert!(matches!(
        converter.convert(row, None),
        Err(ConvertError::MissingField { field }) if field == "body_boc"
    ));
}

#[test]
fn message_contract() {
    let converter = MessageConverter::new().unwrap();
    assert_eq!(converter.name(), "messages");
    assert_eq!(converter.topics(), ["ton.public.messages"]);
    assert_eq!(
        converter.base().ignored_fields(),
        ["body_boc".to_string(), "init_state_boc".to_string()]
    );
    assert!(converter.base().numeric_fields().is_empty());

    let row = message_row(Value::Null, Value::Null);
    assert_eq!(converter.timestamp(&row).unwrap(), TX_NOW);
    assert_eq!(converter.partition(&row).unwrap(), "20231114");
}

#[test]
fn message_with_data_keeps_raw_payloads() {
    let converter = MessageWithDataConverter::new().unwrap();
    let body = cdc2lake_boc::encode_text_comment("gm");
    let row = message_row(b64(&body), b64(b"\x01\x02"));

    let out = converter.convert(row, Some("messages_with_data")).unwrap();
    assert_eq!(out.get("body_boc"), Some(&Value::bytes(&body)));
    assert_eq!(out.get("init_state_boc"), Some(&Value::bytes([1u8, 2])));
    assert_eq!(out.get("comment"), Some(&Value::string("gm")));
    assert!(converter.base().undeclared_fields(&out).is_empty());
}

#[test]
fn message_with_data_null_init_state_stays_null() {
    let converter = MessageWithDataConverter::new().unwrap();
    let out = converter
        .convert(message_row(comment_body("x"), Value::Null), None)
        .unwrap();
    assert_eq!(out.get("init_state_boc"), Some(&Value::Null));

    let mut row = message_row(comment_body("x"), Value::Null);
    row.remove("init_state_boc");
    let out = converter.convert(row, None).unwrap();
    assert!(!out.contains("init_state_boc"));
}

#[test]
fn message_with_data_accepts_raw_bytes() {
    let converter = MessageWithDataConverter::new().unwrap();
    let body = cdc2lake_boc::encode_text_comment("raw");
    let out = converter
        .convert(message_row(Value::bytes(&body), Value::Null), None)
        .unwrap();
    assert_eq!(out.get("comment"), Some(&Value::string("raw")));
}

#[test]
fn message_with_data_non_comment_body_keeps_bytes() {
    let converter = MessageWithDataConverter::new().unwrap();
    let out = converter
        .convert(message_row(b64(b"not a boc"), Value::Null), None)
        .unwrap();
    assert_eq!(out.get("body_boc"), Some(&Value::bytes(b"not a boc")));
    assert_eq!(out.get("comment"), Some(&Value::Null));
}

#[test]
fn message_with_data_invalid_base64_is_fatal() {
    let converter = MessageWithDataConverter::new().unwrap();

    let err = converter
        .convert(message_row(Value::string("@@@"), Value::Null), None)
        .unwrap_err();
    assert!(matches!(
        err,
        ConvertError::MalformedBinaryField { field, .. } if field == "body_boc"
    ));

    let err = converter
        .convert(message_row(comment_body("x"), Value::string("@@@")), None)
        .unwrap_err();
    assert!(matches!(
        err,
        ConvertError::MalformedBinaryField { field, .. } if field == "init_state_boc"
    ));
}

#[test]
fn message_with_data_contract() {
    let converter = MessageWithDataConverter::new().unwrap();
    assert_eq!(converter.name(), "messages_with_data");
    assert_eq!(converter.topics(), ["ton.public.messages_with_data"]);
    assert!(converter.base().ignored_fields().is_empty());

    let mut row = message_row(Value::Null, Value::Null);
    row.insert("tx_now", Value::Null);
    assert!(matches!(
        converter.partition(&row),
        Err(ConvertError::MissingField { .. })
    ));
}

#[test]
fn schema_dir_matches_embedded_schemas() {
    let from_dir = MessageConverter::from_schema_dir(schema_dir()).unwrap();
    let embedded = MessageConverter::new().unwrap();
    assert_eq!(from_dir.base().schema(), embedded.base().schema());

    let from_dir = MessageWithDataConverter::from_schema_dir(schema_dir()).unwrap();
    assert_eq!(from_dir.name(), "messages_with_data");
}

#[test]
fn missing_schema_dir_fails_construction() {
    let err = MessageConverter::from_schema_dir("/nonexistent/schemas").unwrap_err();
    assert!(matches!(err, SchemaLoadError::Read { .. }));
}
