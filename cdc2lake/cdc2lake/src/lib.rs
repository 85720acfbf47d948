//! Normalization of Debezium change events into lake-ready records.
//!
//! A [`ConverterRegistry`] maps stream topics to
//! [`RecordConverter`](cdc2lake_core::RecordConverter)s, unwraps change
//! envelopes, applies the append-only policy (deletes skipped, updates only
//! when the converter enables them) and returns the converted row with its
//! partition key.

mod envelope;
mod error;
mod registry;

pub use cdc2lake_avro as avro;
pub use cdc2lake_core as core;
#[cfg(feature = "ton")]
pub use cdc2lake_ton as ton;
pub use envelope::{ChangeEvent, ChangeOp};
pub use error::{EnvelopeError, RegistryError};
pub use registry::{ConvertedRecord, ConverterRegistry, ConverterRegistryBuilder, Routed};
