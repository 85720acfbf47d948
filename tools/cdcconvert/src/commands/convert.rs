use std::{
    fs,
    io::{self, BufRead, BufReader},
    path::PathBuf,
};

use anyhow::{Context, Result};
use cdc2lake::Routed;
use clap::Args;
use tracing::info;

use super::default_registry;
use crate::{
    input::EventReader,
    writer::{JsonlWriter, RecordWriter},
};

#[derive(Args)]
pub struct ConvertArgs {
    /// Path to the JSONL stream dump (`-` for stdin)
    input: PathBuf,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Treat every line as a bare event value received on this topic
    #[arg(short, long)]
    topic: Option<String>,

    /// Directory holding converter `.avsc` schemas (built-in schemas if not specified)
    #[arg(long)]
    schema_dir: Option<PathBuf>,

    /// Number of events converted in parallel per batch
    #[arg(long, default_value_t = 1024, value_parser = clap::value_parser!(u32).range(1..))]
    batch_size: u32,
}

impl ConvertArgs {
    pub fn run(self) -> Result<()> {
        let registry = default_registry(self.schema_dir.as_deref())?;

        let source: Box<dyn BufRead> = if self.input.as_os_str() == "-" {
            Box::new(io::stdin().lock())
        } else {
            let file = fs::File::open(&self.input)
                .with_context(|| format!("failed to open {}", self.input.display()))?;
            Box::new(BufReader::new(file))
        };
        let mut reader = EventReader::new(source, self.topic);
        let mut writer = JsonlWriter::new(self.output.as_deref())?;

        let mut converted = 0usize;
        let mut skipped = 0usize;
        loop {
            let batch = reader.next_batch(self.batch_size as usize)?;
            if batch.is_empty() {
                break;
            }
            let lines: Vec<usize> = batch.iter().map(|event| event.line).collect();
            let results = registry.route_batch(
                batch
                    .into_iter()
                    .map(|event| (event.topic, event.value))
                    .collect(),
            );

            for (line, result) in lines.into_iter().zip(results) {
                match result.with_context(|| format!("line {line}"))? {
                    Routed::Converted(record) => {
                        writer.write_record(&record)?;
                        converted += 1;
                    }
                    Routed::Skipped { .. } => skipped += 1,
                }
            }
        }

        writer.finish()?;
        info!(converted, skipped, "conversion finished");
        Ok(())
    }
}
