//! The two collaborators the codec consults for records.
//!
//! Record bodies on the wire carry no field names and no field count. The
//! reader walks the same ordered descriptor list the writer walked, so both
//! sides must agree on that list exactly. If they do not, the stream is
//! decoded into the wrong fields (or fails on a type mismatch); it is never
//! detected as such.

use crate::{Record, RecordName, TypeShape, Value};
use bintag_types::{CodecError, Result};
use itertools::Itertools;
use std::borrow::Cow;

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct FieldDescriptor {
    pub name: String,
    pub order: i32,
    pub ignore: bool,
    pub declared: TypeShape,
}

/// Supplies the field layout of each record type.
///
/// Implementations are shared across concurrent encode and decode calls, and
/// must return the same descriptors for a record every time they are asked.
pub trait SchemaProvider: Send + Sync {
    /// `None` if the record type is unknown.
    fn describe_fields(&self, record: &RecordName) -> Option<Cow<'_, [FieldDescriptor]>>;
}

/// Constructs records during decode and accesses their fields.
///
/// Shared across concurrent calls like [`SchemaProvider`].
pub trait InstantiationProvider: Send + Sync {
    /// A new instance of `shape` with every field at its zero value.
    fn create(&self, shape: &TypeShape) -> Result<Record>;

    fn get_field<'r>(&self, record: &'r Record, field: &FieldDescriptor) -> Result<&'r Value> {
        record.get(&field.name).ok_or_else(|| {
            CodecError::unsupported(format!(
                "Record {} has no field {:?}",
                record.name(),
                field.name
            ))
        })
    }

    fn set_field(&self, record: &mut Record, field: &FieldDescriptor, value: Value) -> Result<()> {
        record.set(&field.name, value);
        Ok(())
    }
}

/// The fields that travel on the wire, in wire order.
///
/// Ignored fields are dropped. Equal orders keep their declaration order.
pub fn ordered_fields(fields: &[FieldDescriptor]) -> Vec<&FieldDescriptor> {
    fields
        .iter()
        .filter(|field| !field.ignore)
        .sorted_by_key(|field| field.order)
        .collect()
}
