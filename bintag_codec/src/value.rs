use crate::{RecordName, SequenceKind};
use bintag_types::serde::{Primitive, PrimitiveKind};
use chrono::NaiveDateTime;

/// An in-memory value graph. Encoding is a single match over these variants.
#[derive(PartialEq, Clone, Debug)]
pub enum Value {
    Absent,
    Primitive(Primitive),
    Sequence(Sequence),
    Mapping(Mapping),
    Record(Record),
    /// A value with no serializable representation, known only by its type name.
    Opaque(String),
}

impl From<Primitive> for Value {
    fn from(prim: Primitive) -> Self {
        Self::Primitive(prim)
    }
}
impl From<Sequence> for Value {
    fn from(seq: Sequence) -> Self {
        Self::Sequence(seq)
    }
}
impl From<Mapping> for Value {
    fn from(map: Mapping) -> Self {
        Self::Mapping(map)
    }
}
impl From<Record> for Value {
    fn from(rec: Record) -> Self {
        Self::Record(rec)
    }
}
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            None => Self::Absent,
            Some(t) => t.into(),
        }
    }
}

macro_rules! impl_from_primitive {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(t: $t) -> Self {
                    Self::Primitive(Primitive::from(t))
                }
            }
        )*
    };
}
impl_from_primitive!(bool, u8, i16, i32, i64, f32, f64, NaiveDateTime, String, &str);

impl Value {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn as_primitive(&self) -> Option<&Primitive> {
        match self {
            Self::Primitive(prim) => Some(prim),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(rec) => Some(rec),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Self::Sequence(seq) => Some(seq),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        self.as_primitive().map(Primitive::kind)
    }
}

#[derive(PartialEq, Clone, Debug)]
pub struct Sequence {
    pub kind: SequenceKind,
    pub items: Vec<Value>,
}
impl Sequence {
    pub fn list(items: impl IntoIterator<Item = impl Into<Value>>) -> Self {
        Self {
            kind: SequenceKind::List,
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    pub fn array(items: impl IntoIterator<Item = impl Into<Value>>) -> Self {
        Self {
            kind: SequenceKind::Array,
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// An associative mapping that keeps insertion order.
///
/// Keys may be any [`Value`], so lookup is a linear scan by equality.
#[derive(PartialEq, Clone, Default, Debug)]
pub struct Mapping {
    entries: Vec<(Value, Value)>,
}
impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the value of an equal key in place, keeping its position.
    pub fn insert(&mut self, key: impl Into<Value>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => Some(std::mem::replace(v, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries
            .iter()
            .find_map(|(k, v)| if k == key { Some(v) } else { None })
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Value, Value)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
impl<K: Into<Value>, V: Into<Value>> FromIterator<(K, V)> for Mapping {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// An instance of a named record type. Fields keep the order they were set in;
/// the wire order comes from the schema, not from here.
///
/// Two records are equal when they share a name and hold equal values under
/// the same field names, in any order.
#[derive(Clone, Debug)]
pub struct Record {
    name: RecordName,
    fields: Vec<(String, Value)>,
}
impl Record {
    pub fn new(name: impl Into<RecordName>) -> Self {
        Self {
            name: name.into(),
            fields: vec![],
        }
    }

    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    pub fn name(&self) -> &RecordName {
        &self.name
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find_map(|(name, v)| if name == field { Some(v) } else { None })
    }

    pub fn set(&mut self, field: &str, value: impl Into<Value>) -> Option<Value> {
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| name == field) {
            Some((_, v)) => Some(std::mem::replace(v, value)),
            None => {
                self.fields.push((String::from(field), value));
                None
            }
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, v)| (name.as_str(), v))
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.fields.len() == other.fields.len()
            && self
                .fields
                .iter()
                .all(|(name, v)| other.get(name) == Some(v))
    }
}
