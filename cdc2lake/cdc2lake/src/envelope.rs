//! Debezium change events: the `{before, after, op, source}` envelope or a
//! row already flattened by the `ExtractNewRecordState` transform.

use std::fmt::{self, Display, Formatter};

use cdc2lake_core::{Record, Value};

use crate::error::EnvelopeError;

const OP: &str = "op";
const BEFORE: &str = "before";
const AFTER: &str = "after";
const SOURCE: &str = "source";
const SOURCE_TABLE: &str = "table";

const FLAT_OP: &str = "__op";
const FLAT_TABLE: &str = "__table";
const FLAT_DELETED: &str = "__deleted";

/// Kind of change carried by an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeOp {
    Create,
    /// Snapshot read.
    Read,
    Update,
    Delete,
}

impl ChangeOp {
    /// Single-letter code used on the wire.
    pub fn code(self) -> &'static str {
        match self {
            ChangeOp::Create => "c",
            ChangeOp::Read => "r",
            ChangeOp::Update => "u",
            ChangeOp::Delete => "d",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "c" => Some(ChangeOp::Create),
            "r" => Some(ChangeOp::Read),
            "u" => Some(ChangeOp::Update),
            "d" => Some(ChangeOp::Delete),
            _ => None,
        }
    }
}

impl Display for ChangeOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A change event reduced to the row it carries.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEvent {
    pub op: ChangeOp,
    /// Source table, when the event names one.
    pub table: Option<String>,
    /// Row state after the change, or before it for deletes.
    pub row: Record,
}

impl ChangeEvent {
    /// Interpret a decoded event value.
    ///
    /// A record with an `op` key and a `before` or `after` key is treated as
    /// an envelope; anything else is a flat row whose optional `__op`,
    /// `__table` and `__deleted` metadata fields are stripped.
    pub fn from_record(record: Record) -> Result<Self, EnvelopeError> {
        if record.contains(OP) && (record.contains(AFTER) || record.contains(BEFORE)) {
            from_envelope(record)
        } else {
            from_flat_row(record)
        }
    }
}

fn from_envelope(mut record: Record) -> Result<ChangeEvent, EnvelopeError> {
    let op = parse_op(OP, record.get(OP))?.unwrap_or(ChangeOp::Create);
    let table = source_table(record.get(SOURCE))?;

    let state = if op == ChangeOp::Delete { BEFORE } else { AFTER };
    let row = match record.remove(state) {
        Some(Value::Record(row)) => row,
        Some(Value::Null) | None => {
            return Err(EnvelopeError::new(format!(
                "'{op}' event has no '{state}' row"
            )));
        }
        Some(other) => {
            return Err(EnvelopeError::new(format!(
                "'{state}' must be a record, found {}",
                other.variant_name()
            )));
        }
    };
    Ok(ChangeEvent { op, table, row })
}

fn from_flat_row(mut row: Record) -> Result<ChangeEvent, EnvelopeError> {
    let op = parse_op(FLAT_OP, row.get(FLAT_OP))?;
    let deleted = match row.get(FLAT_DELETED) {
        Some(Value::Bool(deleted)) => *deleted,
        Some(Value::String(deleted)) => deleted.as_ref() == "true",
        _ => false,
    };
    let table = match row.get(FLAT_TABLE) {
        None | Some(Value::Null) => None,
        Some(Value::String(table)) => Some(table.to_string()),
        Some(other) => {
            return Err(EnvelopeError::new(format!(
                "'{FLAT_TABLE}' must be a string, found {}",
                other.variant_name()
            )));
        }
    };
    for field in [FLAT_OP, FLAT_TABLE, FLAT_DELETED] {
        row.remove(field);
    }

    let op = if deleted {
        ChangeOp::Delete
    } else {
        op.unwrap_or(ChangeOp::Create)
    };
    Ok(ChangeEvent { op, table, row })
}

fn parse_op(field: &str, value: Option<&Value>) -> Result<Option<ChangeOp>, EnvelopeError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(code)) => ChangeOp::from_code(code)
            .map(Some)
            .ok_or_else(|| EnvelopeError::new(format!("unknown operation '{code}'"))),
        Some(other) => Err(EnvelopeError::new(format!(
            "'{field}' must be a string, found {}",
            other.variant_name()
        ))),
    }
}

fn source_table(source: Option<&Value>) -> Result<Option<String>, EnvelopeError> {
    let Some(source) = source else {
        return Ok(None);
    };
    let source = source
        .try_record()
        .map_err(|e| EnvelopeError::new(format!("'{SOURCE}': {e}")))?;
    Ok(source
        .and_then(|source| source.get(SOURCE_TABLE))
        .and_then(|table| table.try_str().ok().flatten())
        .map(str::to_string))
}
