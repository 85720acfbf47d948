use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::default_registry;

#[derive(Args)]
pub struct TopicsArgs {
    /// Directory holding converter `.avsc` schemas (built-in schemas if not specified)
    #[arg(long)]
    schema_dir: Option<PathBuf>,
}

impl TopicsArgs {
    pub fn run(self) -> Result<()> {
        let registry = default_registry(self.schema_dir.as_deref())?;
        for (topic, table) in registry.routes() {
            println!("{topic} -> {table}");
        }
        Ok(())
    }
}
