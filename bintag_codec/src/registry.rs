use crate::{
    Codec, FieldDescriptor, InstantiationProvider, Record, RecordName, SchemaProvider, TypeShape,
};
use bintag_types::{CodecError, Result};
use std::borrow::Cow;
use std::collections::HashMap;


/// The declared field list of one record type.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct RecordSchema {
    name: RecordName,
    fields: Vec<FieldDescriptor>,
}

impl RecordSchema {
    pub fn new(name: impl Into<RecordName>) -> Self {
        Self {
            name: name.into(),
            fields: vec![],
        }
    }

    /// Declares a field. Redeclaring a name replaces the earlier declaration
    /// in place.
    pub fn field(self, name: &str, order: i32, declared: TypeShape) -> Self {
        self.declare(name, order, false, declared)
    }

    /// Declares a field that never travels on the wire.
    pub fn ignored(self, name: &str, order: i32, declared: TypeShape) -> Self {
        self.declare(name, order, true, declared)
    }

    fn declare(mut self, name: &str, order: i32, ignore: bool, declared: TypeShape) -> Self {
        let desc = FieldDescriptor {
            name: String::from(name),
            order,
            ignore,
            declared,
        };
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(existing) => *existing = desc,
            None => self.fields.push(desc),
        }
        self
    }

    pub fn name(&self) -> &RecordName {
        &self.name
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }
}

/// An in-memory [`SchemaProvider`] and [`InstantiationProvider`].
///
/// Build it up front, then share it by reference. It is never mutated while
/// a codec borrows it.
#[derive(Default, Debug)]
pub struct SchemaRegistry {
    schemas: HashMap<RecordName, RecordSchema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the schema previously registered under the same name, if any.
    pub fn register(&mut self, schema: RecordSchema) -> Option<RecordSchema> {
        self.schemas.insert(schema.name.clone(), schema)
    }

    pub fn with(mut self, schema: RecordSchema) -> Self {
        self.register(schema);
        self
    }

    pub fn get(&self, name: &RecordName) -> Option<&RecordSchema> {
        self.schemas.get(name)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    pub fn codec(&self) -> Codec<'_, Self, Self> {
        Codec::new(self, self)
    }
}

impl SchemaProvider for SchemaRegistry {
    fn describe_fields(&self, record: &RecordName) -> Option<Cow<'_, [FieldDescriptor]>> {
        self.get(record).map(|schema| Cow::Borrowed(schema.fields()))
    }
}

impl InstantiationProvider for SchemaRegistry {
    fn create(&self, shape: &TypeShape) -> Result<Record> {
        let name = match shape {
            TypeShape::Record(name) => name,
            _ => {
                return Err(CodecError::unsupported(format!(
                    "Cannot instantiate non-record shape {shape:?}"
                )))
            }
        };
        let schema = self
            .get(name)
            .ok_or_else(|| CodecError::mismatch(format!("Record {name} is not registered")))?;

        let mut rec = Record::new(name.clone());
        for field in schema.fields() {
            rec.set(&field.name, field.declared.zero_value());
        }
        Ok(rec)
    }
}
