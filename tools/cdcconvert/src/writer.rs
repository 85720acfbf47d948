use std::{
    fs,
    io::{self, BufWriter, Write},
    path::Path,
};

use anyhow::Result;
use cdc2lake::ConvertedRecord;
use serde::Serialize;

pub trait RecordWriter {
    fn write_record(&mut self, record: &ConvertedRecord) -> Result<()>;
    fn finish(&mut self) -> Result<()>;
}

#[derive(Serialize)]
struct OutputLine<'a> {
    table: &'a str,
    partition: &'a str,
    record: serde_json::Value,
}

// --- JSON Lines ---

pub struct JsonlWriter {
    dest: Box<dyn Write>,
}

impl JsonlWriter {
    pub fn new(output: Option<&Path>) -> Result<Self> {
        let dest: Box<dyn Write> = match output {
            Some(path) => Box::new(BufWriter::new(fs::File::create(path)?)),
            None => Box::new(BufWriter::new(io::stdout().lock())),
        };
        Ok(Self { dest })
    }
}

impl RecordWriter for JsonlWriter {
    fn write_record(&mut self, converted: &ConvertedRecord) -> Result<()> {
        let line = OutputLine {
            table: &converted.table,
            partition: &converted.partition,
            record: converted.record.to_json(),
        };
        serde_json::to_writer(&mut self.dest, &line)?;
        self.dest.write_all(b"\n")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.dest.flush()?;
        Ok(())
    }
}
