use std::path::PathBuf;

/// Failure to load a record schema. Raised at converter construction.
#[derive(Debug, thiserror::Error)]
pub enum SchemaLoadError {
    #[error("failed to read schema file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse schema '{schema}': {source}")]
    Parse {
        schema: String,
        #[source]
        source: Box<apache_avro::Error>,
    },

    #[error("schema '{schema}' must be a record, found {kind}")]
    NotARecord { schema: String, kind: String },

    #[error("schema '{schema}': field '{field}' has unsupported type: {detail}")]
    UnsupportedType {
        schema: String,
        field: String,
        detail: String,
    },
}
