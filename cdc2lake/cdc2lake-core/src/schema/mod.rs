//! Schema-language independent description of record schemas.

mod descriptor;
mod format;
mod types;

pub use descriptor::SchemaDescriptor;
pub use format::format_field_defs;
pub use types::{DataTypeDef, ElementDef, FieldDef, FieldDefs};
