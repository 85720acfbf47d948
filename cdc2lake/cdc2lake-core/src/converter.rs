//! Base converter and the capability trait implemented by record-type converters.

use tracing::trace;

use crate::{
    error::ConvertError, numeric::NumericField, partition::partition_key, record::Record,
    schema::SchemaDescriptor,
};

/// Construction-time settings of a [`Converter`].
///
/// Every converter owns its own lists; nothing is shared between instances.
#[derive(Debug, Clone)]
pub struct ConverterConfig {
    numeric_fields: Vec<NumericField>,
    ignored_fields: Vec<String>,
    strict: bool,
    updates_enabled: bool,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            numeric_fields: Vec::new(),
            ignored_fields: Vec::new(),
            strict: true,
            updates_enabled: false,
        }
    }
}

impl ConverterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_numeric_field(mut self, field: NumericField) -> Self {
        self.numeric_fields.push(field);
        self
    }

    pub fn with_numeric_fields(mut self, fields: impl IntoIterator<Item = NumericField>) -> Self {
        self.numeric_fields.extend(fields);
        self
    }

    pub fn with_ignored_field(mut self, field: impl Into<String>) -> Self {
        self.ignored_fields.push(field.into());
        self
    }

    pub fn with_ignored_fields<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.ignored_fields.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Report records that do not conform to the schema (default: `true`).
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Accept update events from the change stream (default: `false`).
    pub fn with_updates_enabled(mut self, updates_enabled: bool) -> Self {
        self.updates_enabled = updates_enabled;
        self
    }
}

/// Shared conversion logic: field redaction and numeric decoding.
///
/// Record-type converters embed a `Converter` and expose it through
/// [`RecordConverter::base`].
#[derive(Debug, Clone)]
pub struct Converter {
    schema: SchemaDescriptor,
    config: ConverterConfig,
}

impl Converter {
    pub fn new(schema: SchemaDescriptor, config: ConverterConfig) -> Self {
        Self { schema, config }
    }

    /// Table name, taken from the schema's record name.
    pub fn name(&self) -> &str {
        self.schema.name()
    }

    pub fn schema(&self) -> &SchemaDescriptor {
        &self.schema
    }

    pub fn numeric_fields(&self) -> &[NumericField] {
        &self.config.numeric_fields
    }

    pub fn ignored_fields(&self) -> &[String] {
        &self.config.ignored_fields
    }

    pub fn is_strict(&self) -> bool {
        self.config.strict
    }

    pub fn updates_enabled(&self) -> bool {
        self.config.updates_enabled
    }

    /// Remove ignored fields and decode numeric fields, returning the record.
    ///
    /// Ignored fields are removed even when null. Numeric fields that are
    /// absent are skipped; null numerics stay null. All other fields are left
    /// untouched.
    pub fn convert(&self, mut record: Record, table_name: Option<&str>) -> Result<Record, ConvertError> {
        for field in &self.config.ignored_fields {
            record.remove(field);
        }
        for numeric in &self.config.numeric_fields {
            let Some(value) = record.get_mut(&numeric.name) else {
                continue;
            };
            *value = numeric
                .apply(value)
                .map_err(|source| ConvertError::MalformedNumeric {
                    field: numeric.name.clone(),
                    source,
                })?;
        }
        trace!(table = table_name.unwrap_or(self.name()), fields = record.len(), "record converted");
        Ok(record)
    }

    /// Fields present in `record` but not declared by the schema.
    pub fn undeclared_fields<'a>(&self, record: &'a Record) -> Vec<&'a str> {
        record
            .keys()
            .filter(|field| !self.schema.contains(field))
            .collect()
    }
}

/// A converter for one logical record type.
///
/// Implementations fix their schema and field lists at construction and
/// supply the timestamp used for partitioning and the stream topics they
/// consume. `convert` may be overridden to derive payload-specific fields
/// before delegating to [`Converter::convert`].
pub trait RecordConverter: Send + Sync {
    /// The shared conversion logic and configuration.
    fn base(&self) -> &Converter;

    /// Unix timestamp (seconds, UTC) used to partition `record`.
    fn timestamp(&self, record: &Record) -> Result<i64, ConvertError>;

    /// Stream topics routed to this converter.
    fn topics(&self) -> &[&str];

    fn convert(&self, record: Record, table_name: Option<&str>) -> Result<Record, ConvertError> {
        self.base().convert(record, table_name)
    }

    /// `YYYYMMDD` partition key derived from [`RecordConverter::timestamp`].
    fn partition(&self, record: &Record) -> Result<String, ConvertError> {
        partition_key(self.timestamp(record)?)
    }

    fn name(&self) -> &str {
        self.base().name()
    }
}

/// Read an epoch-seconds timestamp that must be present and non-null.
pub fn required_timestamp(record: &Record, field: &str) -> Result<i64, ConvertError> {
    record
        .require(field)?
        .try_i64()
        .map_err(|source| ConvertError::ValueType {
            field: field.to_string(),
            source,
        })?
        .ok_or_else(|| ConvertError::MissingField {
            field: field.to_string(),
        })
}
