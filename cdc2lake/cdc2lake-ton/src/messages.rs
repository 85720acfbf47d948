//! Converters for the indexer's `messages` table.

use std::path::Path;

use cdc2lake_avro::{SchemaLoadError, load_schema};
use cdc2lake_core::{
    ConvertError, Converter, ConverterConfig, Record, RecordConverter, required_timestamp,
};
use tracing::debug;

use crate::{
    COMMENT, TX_NOW,
    payload::{comment_of, decode_payload},
    schema_source,
};

pub const BODY_BOC: &str = "body_boc";
pub const INIT_STATE_BOC: &str = "init_state_boc";

const MESSAGES_FILE: &str = "messages.avsc";
const MESSAGES_SCHEMA: &str = include_str!("../schemas/messages.avsc");
const MESSAGES_WITH_DATA_FILE: &str = "messages_with_data.avsc";
const MESSAGES_WITH_DATA_SCHEMA: &str = include_str!("../schemas/messages_with_data.avsc");

/// Messages with their text comment; raw body and init state are dropped.
#[derive(Debug, Clone)]
pub struct MessageConverter {
    base: Converter,
}

impl MessageConverter {
    pub const TOPIC: &'static str = "ton.public.messages";

    /// Converter using the built-in `messages` schema.
    pub fn new() -> Result<Self, SchemaLoadError> {
        Self::load(None)
    }

    /// Converter reading `messages.avsc` from `dir`.
    pub fn from_schema_dir(dir: impl AsRef<Path>) -> Result<Self, SchemaLoadError> {
        Self::load(Some(dir.as_ref()))
    }

    fn load(dir: Option<&Path>) -> Result<Self, SchemaLoadError> {
        let schema = load_schema(&schema_source(MESSAGES_FILE, MESSAGES_SCHEMA, dir))?;
        let config = ConverterConfig::new().with_ignored_fields([BODY_BOC, INIT_STATE_BOC]);
        Ok(Self {
            base: Converter::new(schema, config),
        })
    }
}

impl RecordConverter for MessageConverter {
    fn base(&self) -> &Converter {
        &self.base
    }

    fn timestamp(&self, record: &Record) -> Result<i64, ConvertError> {
        required_timestamp(record, TX_NOW)
    }

    fn topics(&self) -> &[&str] {
        &[Self::TOPIC]
    }

    fn convert(&self, mut record: Record, table_name: Option<&str>) -> Result<Record, ConvertError> {
        let comment = match decode_payload(BODY_BOC, record.require(BODY_BOC)?) {
            Ok(body) => comment_of(body.as_deref()),
            Err(error) => {
                debug!(%error, "message body is not a readable payload");
                None
            }
        };
        record.insert(COMMENT, comment);
        self.base.convert(record, table_name)
    }
}

/// Messages keeping the raw body and init state payloads as bytes.
#[derive(Debug, Clone)]
pub struct MessageWithDataConverter {
    base: Converter,
}

impl MessageWithDataConverter {
    pub const TOPIC: &'static str = "ton.public.messages_with_data";

    pub fn new() -> Result<Self, SchemaLoadError> {
        Self::load(None)
    }

    pub fn from_schema_dir(dir: impl AsRef<Path>) -> Result<Self, SchemaLoadError> {
        Self::load(Some(dir.as_ref()))
    }

    fn load(dir: Option<&Path>) -> Result<Self, SchemaLoadError> {
        let schema = load_schema(&schema_source(
            MESSAGES_WITH_DATA_FILE,
            MESSAGES_WITH_DATA_SCHEMA,
            dir,
        ))?;
        Ok(Self {
            base: Converter::new(schema, ConverterConfig::new()),
        })
    }
}

impl RecordConverter for MessageWithDataConverter {
    fn base(&self) -> &Converter {
        &self.base
    }

    fn timestamp(&self, record: &Record) -> Result<i64, ConvertError> {
        required_timestamp(record, TX_NOW)
    }

    fn topics(&self) -> &[&str] {
        &[Self::TOPIC]
    }

    fn convert(&self, mut record: Record, table_name: Option<&str>) -> Result<Record, ConvertError> {
        let body = decode_payload(BODY_BOC, record.require(BODY_BOC)?)?;
        let comment = comment_of(body.as_deref());
        record.insert(BODY_BOC, body);

        // Only a present, non-null init state is re-encoded.
        let init_state = match record.get(INIT_STATE_BOC) {
            Some(value) if !value.is_null() => decode_payload(INIT_STATE_BOC, value)?,
            _ => None,
        };
        if let Some(init_state) = init_state {
            record.insert(INIT_STATE_BOC, init_state);
        }

        record.insert(COMMENT, comment);
        self.base.convert(record, table_name)
    }
}
