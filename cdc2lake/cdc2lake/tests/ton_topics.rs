#![cfg(feature = "ton")]

use base64::{Engine as _, engine::general_purpose::STANDARD};
use cdc2lake::{
    ConverterRegistry, Routed,
    core::{Record, Value},
};
use cdc2lake_boc::encode_text_comment;

fn message_envelope(op: &str, comment: &str) -> Record {
    let after: Record = [
        ("tx_hash", Value::string("a1")),
        ("tx_lt", Value::Int(1)),
        ("tx_now", Value::Int(1_709_251_199)),
        ("msg_hash", Value::string("m1")),
        ("direction", Value::string("out")),
        ("body_boc", Value::string(STANDARD.encode(encode_text_comment(comment)))),
        ("init_state_boc", Value::Null),
    ]
    .into_iter()
    .collect();
    [
        ("before", Value::Null),
        ("after", Value::Record(after)),
        ("op", Value::string(op)),
    ]
    .into_iter()
    .collect()
}

#[test]
fn default_converters_cover_indexer_topics() {
    let registry = ConverterRegistry::builder()
        .with_default_converters(None)
        .unwrap()
        .build();

    assert_eq!(
        registry.routes(),
        vec![
            ("ton.public.jetton_transfers", "jetton_transfers"),
            ("ton.public.messages", "messages"),
            ("ton.public.messages_with_data", "messages_with_data"),
        ]
    );
}

#[test]
fn message_event_end_to_end() {
    let registry = ConverterRegistry::builder()
        .with_default_converters(None)
        .unwrap()
        .build();

    let Routed::Converted(out) = registry
        .route("ton.public.messages", message_envelope("c", "hi there"))
        .unwrap()
    else {
        panic!("expected a converted record");
    };
    assert_eq!(out.table, "messages");
    assert_eq!(out.partition, "20240229");
    assert_eq!(out.record.get("comment"), Some(&Value::string("hi there")));
    assert!(!out.record.contains("body_boc"));

    let Routed::Converted(full) = registry
        .route("ton.public.messages_with_data", message_envelope("r", "hi"))
        .unwrap()
    else {
        panic!("expected a converted record");
    };
    assert!(matches!(full.record.get("body_boc"), Some(Value::Bytes(_))));
}

#[test]
fn message_updates_are_skipped() {
    let registry = ConverterRegistry::builder()
        .with_default_converters(None)
        .unwrap()
        .build();
    let routed = registry
        .route("ton.public.messages", message_envelope("u", "x"))
        .unwrap();
    assert!(matches!(routed, Routed::Skipped { .. }));
}
