//! Convert a parsed Avro record schema into [`FieldDefs`].

use apache_avro::{
    Schema,
    schema::{RecordField, RecordSchema, SchemaKind},
};
use cdc2lake_core::{DataTypeDef, ElementDef, FieldDef, FieldDefs, SchemaDescriptor};

use crate::SchemaLoadError;

pub(crate) fn record_to_descriptor(
    origin: &str,
    schema: &Schema,
) -> Result<SchemaDescriptor, SchemaLoadError> {
    let Schema::Record(record) = schema else {
        return Err(SchemaLoadError::NotARecord {
            schema: origin.to_string(),
            kind: format!("{:?}", SchemaKind::from(schema)),
        });
    };
    let fields = record_fields(origin, record)?;
    Ok(SchemaDescriptor::new(
        record.name.name.clone(),
        record.name.namespace.clone(),
        fields,
    ))
}

fn record_fields(origin: &str, record: &RecordSchema) -> Result<FieldDefs, SchemaLoadError> {
    record
        .fields
        .iter()
        .map(|field| record_field_to_field_def(origin, field))
        .collect::<Result<Vec<_>, _>>()
        .map(Into::into)
}

fn record_field_to_field_def(origin: &str, field: &RecordField) -> Result<FieldDef, SchemaLoadError> {
    let element = element_def(origin, &field.name, &field.schema)?;
    Ok(FieldDef {
        name: field.name.clone(),
        element,
    })
}

/// Resolve nullability: `["null", T]` (in either order) is a nullable `T`.
fn element_def(origin: &str, field: &str, schema: &Schema) -> Result<ElementDef, SchemaLoadError> {
    let Schema::Union(union) = schema else {
        return Ok(ElementDef::new(data_type_def(origin, field, schema)?, false));
    };

    let mut non_null = union
        .variants()
        .iter()
        .filter(|variant| !matches!(variant, Schema::Null));
    match (non_null.next(), non_null.next()) {
        (Some(inner), None) => {
            let nullable = union.variants().len() > 1;
            Ok(ElementDef::new(data_type_def(origin, field, inner)?, nullable))
        }
        (None, _) => Ok(ElementDef::new(DataTypeDef::Null, true)),
        (Some(_), Some(_)) => Err(unsupported(
            origin,
            field,
            "unions of more than one non-null type",
        )),
    }
}

fn data_type_def(origin: &str, field: &str, schema: &Schema) -> Result<DataTypeDef, SchemaLoadError> {
    let dt = match schema {
        Schema::Null => DataTypeDef::Null,
        Schema::Boolean => DataTypeDef::Bool,
        Schema::Int | Schema::Date | Schema::TimeMillis => DataTypeDef::I32,
        Schema::Long
        | Schema::TimeMicros
        | Schema::TimestampMillis
        | Schema::TimestampMicros
        | Schema::LocalTimestampMillis
        | Schema::LocalTimestampMicros => DataTypeDef::I64,
        Schema::Float => DataTypeDef::F32,
        Schema::Double => DataTypeDef::F64,
        Schema::String | Schema::Uuid | Schema::Enum(_) => DataTypeDef::String,
        Schema::Bytes | Schema::Fixed(_) | Schema::Duration => DataTypeDef::Bytes,
        Schema::Decimal(decimal) => DataTypeDef::Decimal {
            precision: decimal.precision,
            scale: decimal.scale,
        },
        Schema::Array(array) => {
            DataTypeDef::List(Box::new(element_def(origin, field, &array.items)?))
        }
        Schema::Map(map) => DataTypeDef::Map(Box::new(element_def(origin, field, &map.types)?)),
        Schema::Record(record) => DataTypeDef::Struct(record_fields(origin, record)?),
        Schema::Union(_) => return Err(unsupported(origin, field, "nested unions")),
        other => {
            return Err(unsupported(
                origin,
                field,
                &format!("{:?}", SchemaKind::from(other)),
            ));
        }
    };
    Ok(dt)
}

fn unsupported(origin: &str, field: &str, detail: &str) -> SchemaLoadError {
    SchemaLoadError::UnsupportedType {
        schema: origin.to_string(),
        field: field.to_string(),
        detail: detail.to_string(),
    }
}
