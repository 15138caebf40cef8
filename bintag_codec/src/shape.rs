use crate::Value;
use bintag_types::serde::PrimitiveKind;
use derive_more::{Deref, Display, From};

#[derive(From, Deref, Display, PartialEq, Eq, Hash, Clone, Debug)]
pub struct RecordName(String);
impl From<&str> for RecordName {
    fn from(s: &str) -> Self {
        Self(String::from(s))
    }
}

/// A fixed-size array or a growable list. Both share the `List` wire form.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum SequenceKind {
    Array,
    List,
}

/// The declared type of a decode target.
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub enum TypeShape {
    /// Whatever the stream holds, in its natural form.
    Any,
    Primitive(PrimitiveKind),
    Record(RecordName),
    Sequence {
        kind: SequenceKind,
        element: Box<TypeShape>,
    },
    Mapping {
        key: Box<TypeShape>,
        value: Box<TypeShape>,
    },
}

pub(crate) static ANY: TypeShape = TypeShape::Any;

/* Shorthands. */
impl TypeShape {
    pub const BOOL: TypeShape = TypeShape::Primitive(PrimitiveKind::Bool);
    pub const BYTE: TypeShape = TypeShape::Primitive(PrimitiveKind::Byte);
    pub const INT16: TypeShape = TypeShape::Primitive(PrimitiveKind::Int16);
    pub const INT32: TypeShape = TypeShape::Primitive(PrimitiveKind::Int32);
    pub const INT64: TypeShape = TypeShape::Primitive(PrimitiveKind::Int64);
    pub const FLOAT: TypeShape = TypeShape::Primitive(PrimitiveKind::Float);
    pub const DOUBLE: TypeShape = TypeShape::Primitive(PrimitiveKind::Double);
    pub const DATETIME: TypeShape = TypeShape::Primitive(PrimitiveKind::DateTime);
    pub const STRING: TypeShape = TypeShape::Primitive(PrimitiveKind::String);

    pub fn record(name: impl Into<RecordName>) -> Self {
        Self::Record(name.into())
    }

    pub fn list(element: TypeShape) -> Self {
        Self::Sequence {
            kind: SequenceKind::List,
            element: Box::new(element),
        }
    }

    pub fn array(element: TypeShape) -> Self {
        Self::Sequence {
            kind: SequenceKind::Array,
            element: Box::new(element),
        }
    }

    pub fn map(key: TypeShape, value: TypeShape) -> Self {
        Self::Mapping {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// The value a freshly created record holds in a slot of this shape.
    pub fn zero_value(&self) -> Value {
        match self {
            Self::Primitive(kind) => Value::Primitive(kind.zero()),
            Self::Any | Self::Record(_) | Self::Sequence { .. } | Self::Mapping { .. } => {
                Value::Absent
            }
        }
    }
}
