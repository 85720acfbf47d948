//! Avro schema loading for `cdc2lake` converters.
//!
//! Converters declare their record layout as an Avro record schema (`.avsc`).
//! This crate reads such a document and turns it into a
//! [`SchemaDescriptor`], the schema-language independent form used by
//! `cdc2lake-core`.

mod convert;
mod error;

use std::{
    fmt::{self, Display, Formatter},
    path::{Path, PathBuf},
};

use apache_avro::Schema;
use cdc2lake_core::SchemaDescriptor;
pub use error::SchemaLoadError;
use tracing::debug;

/// Where a converter's schema document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaSource {
    /// An `.avsc` file on disk.
    Path(PathBuf),
    /// Schema text compiled into the binary. `name` identifies it in errors.
    Inline { name: String, text: String },
}

impl SchemaSource {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    pub fn inline(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Inline {
            name: name.into(),
            text: text.into(),
        }
    }
}

impl Display for SchemaSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SchemaSource::Path(path) => write!(f, "{}", path.display()),
            SchemaSource::Inline { name, .. } => write!(f, "<inline {name}>"),
        }
    }
}

/// Load and parse the record schema described by `source`.
pub fn load_schema(source: &SchemaSource) -> Result<SchemaDescriptor, SchemaLoadError> {
    match source {
        SchemaSource::Path(path) => load_schema_file(path),
        SchemaSource::Inline { name, text } => parse_schema(name, text),
    }
}

fn load_schema_file(path: &Path) -> Result<SchemaDescriptor, SchemaLoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| SchemaLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_schema(&path.display().to_string(), &text)
}

/// Parse Avro schema JSON text. `origin` is only used for diagnostics.
pub fn parse_schema(origin: &str, text: &str) -> Result<SchemaDescriptor, SchemaLoadError> {
    let schema = Schema::parse_str(text).map_err(|source| SchemaLoadError::Parse {
        schema: origin.to_string(),
        source: Box::new(source),
    })?;
    let descriptor = convert::record_to_descriptor(origin, &schema)?;
    debug!(
        schema = origin,
        record = %descriptor.full_name(),
        fields = descriptor.fields().len(),
        "loaded record schema"
    );
    Ok(descriptor)
}
