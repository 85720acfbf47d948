use std::fmt::{Error, Result, Write as _};

use super::{DataTypeDef, FieldDef};

/// Format field definitions in a readable style:
/// primitive fields are rendered in one line, compound fields are pretty-printed.
pub fn format_field_defs(fields: impl AsRef<[FieldDef]>) -> std::result::Result<String, Error> {
    let mut out = String::new();
    for field in fields.as_ref() {
        format_labeled_type(
            &field.name,
            &field.element.data_type,
            field.element.nullable,
            0,
            &mut out,
        )?;
    }
    Ok(out)
}

fn format_compound(
    data_type: &DataTypeDef,
    nullable: bool,
    indent: usize,
    out: &mut String,
) -> Result {
    let pad = " ".repeat(indent);
    writeln!(out, "{pad}type: {data_type}")?;
    writeln!(out, "{pad}nullable: {nullable}")?;

    match data_type {
        DataTypeDef::Struct(fields) => {
            writeln!(out, "{pad}fields:")?;
            for child in fields.iter() {
                format_labeled_type(
                    &child.name,
                    &child.element.data_type,
                    child.element.nullable,
                    indent + 4,
                    out,
                )?;
            }
        }
        DataTypeDef::List(elem) => {
            format_labeled_type("item", &elem.data_type, elem.nullable, indent, out)?;
        }
        DataTypeDef::Map(value) => {
            format_labeled_type("value", &value.data_type, value.nullable, indent, out)?;
        }
        _ => unreachable!("{data_type:?} is not a compound type"),
    }
    Ok(())
}

fn format_labeled_type(
    label: &str,
    data_type: &DataTypeDef,
    nullable: bool,
    indent: usize,
    out: &mut String,
) -> Result {
    let pad = " ".repeat(indent);
    if data_type.is_primitive() {
        writeln!(out, "{pad}{label}: {{ type: {data_type}, nullable: {nullable} }}")?;
    } else {
        writeln!(out, "{pad}{label}:")?;
        format_compound(data_type, nullable, indent + 4, out)?;
    }
    Ok(())
}
