use std::{fs, path::PathBuf};

use anyhow::{Result, anyhow};
use clap::Args;

use super::default_registry;

#[derive(Args)]
pub struct SchemaArgs {
    /// Converter (table) name, e.g. `messages`
    converter: String,

    /// Directory holding converter `.avsc` schemas (built-in schemas if not specified)
    #[arg(long)]
    schema_dir: Option<PathBuf>,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl SchemaArgs {
    pub fn run(self) -> Result<()> {
        let registry = default_registry(self.schema_dir.as_deref())?;
        let converter = registry.converter(&self.converter).ok_or_else(|| {
            let mut known: Vec<_> = registry.routes().into_iter().map(|(_, table)| table).collect();
            known.sort_unstable();
            known.dedup();
            anyhow!(
                "unknown converter '{}' (available: {})",
                self.converter,
                known.join(", ")
            )
        })?;
        let text = converter.base().schema().to_string();

        match self.output {
            Some(path) => fs::write(path, text)?,
            None => print!("{text}"),
        }
        Ok(())
    }
}
