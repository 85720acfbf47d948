use std::path::Path;

use cdc2lake_avro::{SchemaLoadError, load_schema};
use cdc2lake_core::{
    ConvertError, Converter, ConverterConfig, NumericField, Record, RecordConverter,
    required_timestamp,
};

use crate::{
    COMMENT, TX_NOW,
    payload::{comment_of, decode_payload},
    schema_source,
};

pub const AMOUNT: &str = "amount";
pub const FORWARD_TON_AMOUNT: &str = "forward_ton_amount";
pub const FORWARD_PAYLOAD: &str = "forward_payload";
pub const CUSTOM_PAYLOAD: &str = "custom_payload";

const JETTON_TRANSFERS_FILE: &str = "jetton_transfers.avsc";
const JETTON_TRANSFERS_SCHEMA: &str = include_str!("../schemas/jetton_transfers.avsc");

/// Jetton transfers. `amount` is kept as an exact integer string since it
/// routinely exceeds 64 bits; the forward payload comment is extracted.
#[derive(Debug, Clone)]
pub struct JettonTransferConverter {
    base: Converter,
}

impl JettonTransferConverter {
    pub const TOPIC: &'static str = "ton.public.jetton_transfers";

    pub fn new() -> Result<Self, SchemaLoadError> {
        Self::load(None)
    }

    pub fn from_schema_dir(dir: impl AsRef<Path>) -> Result<Self, SchemaLoadError> {
        Self::load(Some(dir.as_ref()))
    }

    fn load(dir: Option<&Path>) -> Result<Self, SchemaLoadError> {
        let schema = load_schema(&schema_source(
            JETTON_TRANSFERS_FILE,
            JETTON_TRANSFERS_SCHEMA,
            dir,
        ))?;
        let config = ConverterConfig::new()
            .with_numeric_fields([
                NumericField::new(AMOUNT, true, true),
                NumericField::new(FORWARD_TON_AMOUNT, true, false),
            ])
            .with_ignored_field(CUSTOM_PAYLOAD);
        Ok(Self {
            base: Converter::new(schema, config),
        })
    }
}

impl RecordConverter for JettonTransferConverter {
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
        let payload = match record.get(FORWARD_PAYLOAD) {
            Some(value) => decode_payload(FORWARD_PAYLOAD, value)?,
            None => None,
        };
        let comment = comment_of(payload.as_deref());
        if let Some(payload) = payload {
            record.insert(FORWARD_PAYLOAD, payload);
        }
        record.insert(COMMENT, comment);
        self.base.convert(record, table_name)
    }
}
