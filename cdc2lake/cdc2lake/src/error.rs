//! Error types for routing change events.

use cdc2lake_avro::SchemaLoadError;
use cdc2lake_core::ConvertError;

/// A change event could not be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{detail}")]
pub struct EnvelopeError {
    pub detail: String,
}

impl EnvelopeError {
    pub(crate) fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Errors produced by [`ConverterRegistry`](crate::ConverterRegistry).
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// No converter consumes the topic.
    #[error("no converter registered for topic '{topic}'")]
    NoConverter { topic: String },

    /// The event value is neither a change envelope nor a flat row.
    #[error("malformed change event on topic '{topic}': {detail}")]
    MalformedEnvelope { topic: String, detail: String },

    /// The converter rejected the row.
    #[error("conversion failed for topic '{topic}': {source}")]
    Convert {
        topic: String,
        #[source]
        source: ConvertError,
    },

    /// A built-in converter could not load its schema.
    #[error(transparent)]
    SchemaLoad(#[from] SchemaLoadError),
}
