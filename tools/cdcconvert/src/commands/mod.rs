pub mod convert;
pub mod schema;
pub mod topics;

use std::path::Path;

use anyhow::{Context, Result};
use cdc2lake::ConverterRegistry;

/// Registry with every built-in converter.
fn default_registry(schema_dir: Option<&Path>) -> Result<ConverterRegistry> {
    let registry = ConverterRegistry::builder()
        .with_default_converters(schema_dir)
        .context("failed to load converter schemas")?
        .build();
    Ok(registry)
}
