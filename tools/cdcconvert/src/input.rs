use std::io::BufRead;

use anyhow::{Context, Result};
use cdc2lake::core::{Record, Value};
use serde::Deserialize;

/// One line of a stream dump.
#[derive(Deserialize)]
struct StreamLine {
    topic: String,
    value: serde_json::Value,
}

/// A change event read from line `line` (1-based) of the input.
pub struct InputEvent {
    pub line: usize,
    pub topic: String,
    pub value: Record,
}

/// Reads change events from JSON Lines.
///
/// Without a fixed topic every line is `{"topic": ..., "value": {...}}`;
/// with one, every line is the event value itself. Blank lines are skipped.
pub struct EventReader<R> {
    lines: std::io::Lines<R>,
    topic: Option<String>,
    line: usize,
}

impl<R: BufRead> EventReader<R> {
    pub fn new(reader: R, topic: Option<String>) -> Self {
        Self {
            lines: reader.lines(),
            topic,
            line: 0,
        }
    }

    /// Read up to `max` events. An empty batch means the input is exhausted.
    pub fn next_batch(&mut self, max: usize) -> Result<Vec<InputEvent>> {
        let mut batch = Vec::with_capacity(max);
        while batch.len() < max {
            let Some(text) = self.lines.next() else {
                break;
            };
            self.line += 1;
            let text = text.with_context(|| format!("failed to read line {}", self.line))?;
            if text.trim().is_empty() {
                continue;
            }
            batch.push(self.parse(&text)?);
        }
        Ok(batch)
    }

    fn parse(&self, text: &str) -> Result<InputEvent> {
        let line = self.line;
        let (topic, json) = match &self.topic {
            Some(topic) => (
                topic.clone(),
                serde_json::from_str::<serde_json::Value>(text)
                    .with_context(|| format!("line {line}: invalid JSON"))?,
            ),
            None => {
                let parsed: StreamLine = serde_json::from_str(text)
                    .with_context(|| format!("line {line}: expected {{\"topic\", \"value\"}}"))?;
                (parsed.topic, parsed.value)
            }
        };
        let value = Record::try_from(Value::from(json))
            .with_context(|| format!("line {line}: event value must be an object"))?;
        Ok(InputEvent { line, topic, value })
    }
}
