use std::fmt::{self, Display, Formatter};

use super::{FieldDef, FieldDefs};

/// A parsed record schema: the record-type name and its ordered fields.
///
/// Built once by a schema loader and never mutated afterwards, so a single
/// descriptor can be shared by converters running on several threads.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDescriptor {
    name: String,
    namespace: Option<String>,
    fields: FieldDefs,
}

impl SchemaDescriptor {
    pub fn new(name: impl Into<String>, namespace: Option<String>, fields: FieldDefs) -> Self {
        Self {
            name: name.into(),
            namespace,
            fields,
        }
    }

    /// Declared record-type name (without namespace).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// `namespace.name`, or just the name when no namespace is declared.
    pub fn full_name(&self) -> String {
        match &self.namespace {
            Some(ns) if !ns.is_empty() => format!("{ns}.{}", self.name),
            _ => self.name.clone(),
        }
    }

    pub fn fields(&self) -> &FieldDefs {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.field(name).is_some()
    }
}

impl Display for SchemaDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.full_name())?;
        write!(f, "{}", self.fields)
    }
}
