//! Topic routing of change events to record-type converters.

#[cfg(feature = "ton")]
use std::path::Path;
use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use cdc2lake_core::{Record, RecordConverter};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::{
    envelope::{ChangeEvent, ChangeOp},
    error::RegistryError,
};

/// A row converted for the lake.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedRecord {
    /// Lake table, named after the converter's schema.
    pub table: String,
    /// `YYYYMMDD` partition key.
    pub partition: String,
    pub record: Record,
}

/// Outcome of routing one change event.
#[derive(Debug, Clone, PartialEq)]
pub enum Routed {
    Converted(ConvertedRecord),
    /// Deletes, and updates for converters that do not accept them.
    Skipped { op: ChangeOp },
}

/// Maps stream topics to the converters consuming them.
pub struct ConverterRegistry {
    by_topic: HashMap<String, Arc<dyn RecordConverter>>,
}

/// Builder for configuring [`ConverterRegistry`].
pub struct ConverterRegistryBuilder {
    converters: Vec<Arc<dyn RecordConverter>>,
}

impl ConverterRegistry {
    /// Create a builder for [`ConverterRegistry`].
    pub fn builder() -> ConverterRegistryBuilder {
        ConverterRegistryBuilder {
            converters: Vec::new(),
        }
    }

    pub fn new() -> Self {
        Self {
            by_topic: HashMap::new(),
        }
    }

    /// Register a converter for every topic it consumes, replacing any
    /// converter previously registered for those topics.
    pub fn register_converter(&mut self, converter: Box<dyn RecordConverter>) {
        self.register_shared_converter(Arc::from(converter));
    }

    pub fn register_shared_converter(&mut self, converter: Arc<dyn RecordConverter>) {
        for topic in converter.topics() {
            self.by_topic.insert(topic.to_string(), Arc::clone(&converter));
        }
    }

    pub fn converter_for(&self, topic: &str) -> Option<&Arc<dyn RecordConverter>> {
        self.by_topic.get(topic)
    }

    /// Look a converter up by its table name.
    pub fn converter(&self, name: &str) -> Option<&Arc<dyn RecordConverter>> {
        self.by_topic.values().find(|converter| converter.name() == name)
    }

    /// `(topic, table)` pairs, ordered by topic.
    pub fn routes(&self) -> Vec<(&str, &str)> {
        self.by_topic
            .iter()
            .map(|(topic, converter)| (topic.as_str(), converter.name()))
            .collect::<BTreeMap<_, _>>()
            .into_iter()
            .collect()
    }

    /// Convert one change event received on `topic`.
    pub fn route(&self, topic: &str, value: Record) -> Result<Routed, RegistryError> {
        let converter = self
            .converter_for(topic)
            .ok_or_else(|| RegistryError::NoConverter {
                topic: topic.to_string(),
            })?;
        let event = ChangeEvent::from_record(value).map_err(|e| RegistryError::MalformedEnvelope {
            topic: topic.to_string(),
            detail: e.detail,
        })?;

        let base = converter.base();
        match event.op {
            ChangeOp::Delete => {
                debug!(topic, "skipping delete event");
                return Ok(Routed::Skipped { op: event.op });
            }
            ChangeOp::Update if !base.updates_enabled() => {
                debug!(topic, "skipping update event");
                return Ok(Routed::Skipped { op: event.op });
            }
            _ => {}
        }

        let convert_error = |source| RegistryError::Convert {
            topic: topic.to_string(),
            source,
        };
        let partition = converter.partition(&event.row).map_err(convert_error)?;
        let record = converter
            .convert(event.row, event.table.as_deref())
            .map_err(convert_error)?;

        if base.is_strict() {
            let undeclared = base.undeclared_fields(&record);
            if !undeclared.is_empty() {
                warn!(
                    topic,
                    table = converter.name(),
                    fields = ?undeclared,
                    "record has fields not declared by the schema"
                );
            }
        }

        Ok(Routed::Converted(ConvertedRecord {
            table: converter.name().to_string(),
            partition,
            record,
        }))
    }

    /// Route a batch of `(topic, value)` events in parallel. Results keep the
    /// input order.
    pub fn route_batch(&self, events: Vec<(String, Record)>) -> Vec<Result<Routed, RegistryError>> {
        events
            .into_par_iter()
            .map(|(topic, value)| self.route(&topic, value))
            .collect()
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ConverterRegistryBuilder {
    /// Register a converter.
    pub fn with_converter(mut self, converter: impl RecordConverter + 'static) -> Self {
        self.converters.push(Arc::new(converter));
        self
    }

    pub fn with_shared_converter(mut self, converter: Arc<dyn RecordConverter>) -> Self {
        self.converters.push(converter);
        self
    }

    /// Register all built-in TON converters, reading their schemas from
    /// `schema_dir` when given.
    #[cfg(feature = "ton")]
    pub fn with_default_converters(mut self, schema_dir: Option<&Path>) -> Result<Self, RegistryError> {
        self.converters.extend(cdc2lake_ton::all_converters(schema_dir)?);
        Ok(self)
    }

    /// Build the registry. Later converters win on shared topics.
    pub fn build(self) -> ConverterRegistry {
        let mut registry = ConverterRegistry::new();
        for converter in self.converters {
            registry.register_shared_converter(converter);
        }
        registry
    }
}
