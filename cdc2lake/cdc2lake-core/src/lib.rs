//! Record model, schema IR and converter contracts for `cdc2lake`.
//!
//! This crate is independent of any schema language or payload format. It
//! provides:
//! - [`Value`] / [`Record`]: the flat field mapping produced by CDC decoding.
//! - [`SchemaDescriptor`] / [`FieldDefs`]: the parsed record schema.
//! - [`decode_numeric`] / [`NumericField`]: exact decoding of fixed-point
//!   `{value, scale}` numerics.
//! - [`Converter`] / [`RecordConverter`]: field redaction, numeric decoding
//!   and `YYYYMMDD` partitioning shared by every record-type converter.

mod converter;
mod error;
mod json;
mod numeric;
mod partition;
mod record;
mod schema;
mod value;

pub use converter::{Converter, ConverterConfig, RecordConverter, required_timestamp};
pub use error::{ConvertError, MalformedNumericValue, ValueTypeError};
pub use numeric::{MAX_SCALE, NumericField, SCALE_KEY, VALUE_KEY, decode_numeric, encode_numeric};
pub use partition::{PARTITION_FORMAT, partition_key};
pub use record::Record;
pub use schema::{DataTypeDef, ElementDef, FieldDef, FieldDefs, SchemaDescriptor, format_field_defs};
pub use value::Value;
