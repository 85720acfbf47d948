use std::{
    io,
    sync::{Arc, Mutex},
};

use cdc2lake::{
    ChangeOp, ConverterRegistry, RegistryError, Routed,
    core::{
        ConvertError, Converter, ConverterConfig, DataTypeDef, FieldDef, NumericField, Record,
        RecordConverter, SchemaDescriptor, Value, required_timestamp,
    },
};

struct TestConverter {
    base: Converter,
    topics: &'static [&'static str],
}

impl TestConverter {
    fn new(name: &str, topics: &'static [&'static str], config: ConverterConfig) -> Self {
        let schema = SchemaDescriptor::new(
            name,
            None,
            vec![
                FieldDef::new("id", DataTypeDef::I64, false),
                FieldDef::new("ts", DataTypeDef::I64, false),
                FieldDef::new("price", DataTypeDef::Decimal { precision: 10, scale: 2 }, true),
            ]
            .into(),
        );
        Self {
            base: Converter::new(schema, config.with_numeric_field(NumericField::new("price", false, true))),
            topics,
        }
    }
}

impl RecordConverter for TestConverter {
    fn base(&self) -> &Converter {
        &self.base
    }

    fn timestamp(&self, record: &Record) -> Result<i64, ConvertError> {
        required_timestamp(record, "ts")
    }

    fn topics(&self) -> &[&str] {
        self.topics
    }
}

fn registry(config: ConverterConfig) -> ConverterRegistry {
    ConverterRegistry::builder()
        .with_converter(TestConverter::new("trades", &["db.public.trades"], config))
        .build()
}

fn flat(op: &str, ts: Value) -> Record {
    [
        ("id", Value::Int(1)),
        ("ts", ts),
        (
            "price",
            Value::Record(
                [("value", Value::string("MDk=")), ("scale", Value::Int(2))]
                    .into_iter()
                    .collect(),
            ),
        ),
        ("__op", Value::string(op)),
    ]
    .into_iter()
    .collect()
}

fn converted(routed: Routed) -> cdc2lake::ConvertedRecord {
    match routed {
        Routed::Converted(converted) => converted,
        other => panic!("expected a converted record, got {other:?}"),
    }
}

#[test]
fn routes_by_topic_and_partitions() {
    let registry = registry(ConverterConfig::new());
    let out = converted(
        registry
            .route("db.public.trades", flat("c", Value::Int(1_700_000_000)))
            .unwrap(),
    );

    assert_eq!(out.table, "trades");
    assert_eq!(out.partition, "20231114");
    assert_eq!(out.record.get("price"), Some(&Value::string("123.45")));
    assert!(!out.record.contains("__op"));
}

#[test]
fn unknown_topic() {
    let registry = registry(ConverterConfig::new());
    let err = registry.route("db.public.other", flat("c", Value::Int(0))).unwrap_err();
    assert!(matches!(err, RegistryError::NoConverter { topic } if topic == "db.public.other"));
}

#[test]
fn deletes_are_skipped() {
    let registry = registry(ConverterConfig::new().with_updates_enabled(true));
    let routed = registry.route("db.public.trades", flat("d", Value::Null)).unwrap();
    assert_eq!(routed, Routed::Skipped { op: ChangeOp::Delete });
}

#[test]
fn updates_follow_converter_flag() {
    let disabled = registry(ConverterConfig::new());
    assert_eq!(
        disabled.route("db.public.trades", flat("u", Value::Int(0))).unwrap(),
        Routed::Skipped { op: ChangeOp::Update }
    );

    let enabled = registry(ConverterConfig::new().with_updates_enabled(true));
    let out = converted(enabled.route("db.public.trades", flat("u", Value::Int(0))).unwrap());
    assert_eq!(out.partition, "19700101");
}

#[test]
fn conversion_errors_name_the_topic() {
    let registry = registry(ConverterConfig::new());
    let err = registry.route("db.public.trades", flat("c", Value::Null)).unwrap_err();
    match err {
        RegistryError::Convert { topic, source } => {
            assert_eq!(topic, "db.public.trades");
            assert!(matches!(source, ConvertError::MissingField { field } if field == "ts"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn malformed_envelope() {
    let registry = registry(ConverterConfig::new());
    let err = registry.route("db.public.trades", flat("?", Value::Int(0))).unwrap_err();
    assert!(matches!(err, RegistryError::MalformedEnvelope { .. }));
}

/// Route one record under a scoped subscriber and return what it logged.
fn route_logged(registry: &ConverterRegistry, record: Record) -> (Routed, String) {
    let buffer = Arc::new(Mutex::new(Vec::new()));
    let writer = Arc::clone(&buffer);
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .with_writer(move || SharedBuffer(Arc::clone(&writer)))
        .finish();
    let routed = tracing::subscriber::with_default(subscriber, || {
        registry.route("db.public.trades", record).unwrap()
    });
    let logged = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
    (routed, logged)
}

struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn strict_mode_warns_on_undeclared_fields() {
    let registry = registry(ConverterConfig::new().with_strict(true));
    let mut record = flat("c", Value::Int(0));
    record.insert("extra", Value::Bool(true));

    let (routed, logged) = route_logged(&registry, record);
    let out = converted(routed);
    assert_eq!(out.record.get("extra"), Some(&Value::Bool(true)));
    assert!(logged.contains("WARN"), "{logged}");
    assert!(logged.contains("record has fields not declared by the schema"), "{logged}");
    assert!(logged.contains("extra"), "{logged}");

    let (_, logged) = route_logged(&registry, flat("c", Value::Int(0)));
    assert!(logged.is_empty(), "{logged}");
}

#[test]
fn lenient_mode_keeps_undeclared_fields_silently() {
    let registry = registry(ConverterConfig::new().with_strict(false));
    let mut record = flat("c", Value::Int(0));
    record.insert("extra", Value::Bool(true));

    let (routed, logged) = route_logged(&registry, record);
    let out = converted(routed);
    assert_eq!(out.record.get("extra"), Some(&Value::Bool(true)));
    assert!(logged.is_empty(), "{logged}");
}

#[test]
fn later_registration_wins() {
    let registry = ConverterRegistry::builder()
        .with_converter(TestConverter::new("first", &["t"], ConverterConfig::new()))
        .with_converter(TestConverter::new("second", &["t", "u"], ConverterConfig::new()))
        .build();

    assert_eq!(registry.converter_for("t").unwrap().name(), "second");
    assert_eq!(registry.routes(), vec![("t", "second"), ("u", "second")]);
    assert!(registry.converter("first").is_none());
    assert!(registry.converter("second").is_some());
}

#[test]
fn batch_routing_keeps_order() {
    let registry = registry(ConverterConfig::new());
    let events = (0..64)
        .map(|day| {
            let topic = if day == 10 { "missing" } else { "db.public.trades" };
            (topic.to_string(), flat("c", Value::Int(day * 86_400)))
        })
        .collect();

    let results = registry.route_batch(events);
    assert_eq!(results.len(), 64);
    assert!(matches!(results[10], Err(RegistryError::NoConverter { .. })));
    let Ok(Routed::Converted(first)) = &results[1] else {
        panic!("expected a converted record");
    };
    assert_eq!(first.partition, "19700102");
    let Ok(Routed::Converted(last)) = &results[63] else {
        panic!("expected a converted record");
    };
    assert_eq!(last.partition, "19700305");
}
