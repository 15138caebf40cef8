use crate::serde::TypeTag;
use crate::{CodecError, Result};
use chrono::{DateTime, NaiveDateTime, Timelike};
use derive_more::From;

/// A single self-contained value. Everything else is built out of these.
#[derive(From, PartialEq, Clone, Debug)]
pub enum Primitive {
    Bool(bool),
    Byte(u8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float(f32),
    Double(f64),
    DateTime(NaiveDateTime),
    String(String),
}
impl From<&str> for Primitive {
    fn from(s: &str) -> Self {
        Self::String(String::from(s))
    }
}

/// The declared (static) type of a primitive slot.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum PrimitiveKind {
    Bool,
    Byte,
    Int16,
    Int32,
    Int64,
    Float,
    Double,
    DateTime,
    String,
}

impl PrimitiveKind {
    /// The tag used when no compaction applies.
    pub fn tag(self) -> TypeTag {
        match self {
            Self::Bool => TypeTag::Bool,
            Self::Byte => TypeTag::Byte,
            Self::Int16 => TypeTag::Int16,
            Self::Int32 => TypeTag::Int32,
            Self::Int64 => TypeTag::Int64,
            Self::Float => TypeTag::Float,
            Self::Double => TypeTag::Double,
            Self::DateTime => TypeTag::DateTime,
            Self::String => TypeTag::String,
        }
    }

    pub fn zero(self) -> Primitive {
        match self {
            Self::Bool => Primitive::Bool(false),
            Self::Byte => Primitive::Byte(0),
            Self::Int16 => Primitive::Int16(0),
            Self::Int32 => Primitive::Int32(0),
            Self::Int64 => Primitive::Int64(0),
            Self::Float => Primitive::Float(0.0),
            Self::Double => Primitive::Double(0.0),
            Self::DateTime => Primitive::DateTime(NaiveDateTime::default()),
            Self::String => Primitive::String(String::new()),
        }
    }
}

/// A numeric value lifted out of its storage width.
#[derive(Clone, Copy, Debug)]
enum Num {
    Int(i64),
    Float(f64),
}

impl Primitive {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Self::Bool(_) => PrimitiveKind::Bool,
            Self::Byte(_) => PrimitiveKind::Byte,
            Self::Int16(_) => PrimitiveKind::Int16,
            Self::Int32(_) => PrimitiveKind::Int32,
            Self::Int64(_) => PrimitiveKind::Int64,
            Self::Float(_) => PrimitiveKind::Float,
            Self::Double(_) => PrimitiveKind::Double,
            Self::DateTime(_) => PrimitiveKind::DateTime,
            Self::String(_) => PrimitiveKind::String,
        }
    }

    fn num(&self) -> Option<Num> {
        let num = match self {
            Self::Byte(i) => Num::Int(i64::from(*i)),
            Self::Int16(i) => Num::Int(i64::from(*i)),
            Self::Int32(i) => Num::Int(i64::from(*i)),
            Self::Int64(i) => Num::Int(*i),
            Self::Float(f) => Num::Float(f64::from(*f)),
            Self::Double(f) => Num::Float(*f),
            Self::Bool(_) | Self::DateTime(_) | Self::String(_) => return None,
        };
        Some(num)
    }

    /// Converts a decoded value into the slot's declared kind.
    ///
    /// Numeric kinds convert among each other as long as the value survives:
    /// integers must fit the target range, and a float only becomes an integer
    /// when it has no fractional part. Float targets accept any numeric value,
    /// rounding to the nearest representable one.
    /// `Bool`, `DateTime` and `String` only convert to themselves.
    pub fn convert(self, kind: PrimitiveKind) -> Result<Primitive> {
        if self.kind() == kind {
            return Ok(self);
        }
        let num = self.num().ok_or_else(|| self.mismatch(kind))?;
        let converted = match kind {
            PrimitiveKind::Byte => cast_int(num).map(Primitive::Byte),
            PrimitiveKind::Int16 => cast_int(num).map(Primitive::Int16),
            PrimitiveKind::Int32 => cast_int(num).map(Primitive::Int32),
            PrimitiveKind::Int64 => cast_int(num).map(Primitive::Int64),
            PrimitiveKind::Float => Some(Primitive::Float(match num {
                Num::Int(i) => i as f32,
                Num::Float(f) => f as f32,
            })),
            PrimitiveKind::Double => Some(Primitive::Double(match num {
                Num::Int(i) => i as f64,
                Num::Float(f) => f,
            })),
            PrimitiveKind::Bool | PrimitiveKind::DateTime | PrimitiveKind::String => None,
        };
        converted.ok_or_else(|| self.mismatch(kind))
    }

    fn mismatch(&self, kind: PrimitiveKind) -> CodecError {
        CodecError::mismatch(format!("Cannot convert {self:?} into {kind:?}"))
    }
}

fn cast_int<T: num_traits::NumCast>(num: Num) -> Option<T> {
    match num {
        Num::Int(i) => num_traits::cast(i),
        Num::Float(f) if f.fract() == 0.0 => num_traits::cast(f),
        Num::Float(_) => None,
    }
}

/* DateTime payload: signed microseconds since 1970-01-01T00:00:00, no zone. */

/// Refuses values the payload cannot hold exactly: sub-microsecond parts
/// and leap seconds.
pub fn datetime_to_ticks(dt: &NaiveDateTime) -> Result<i64> {
    let nanos = dt.nanosecond();
    if nanos >= 1_000_000_000 || nanos % 1_000 != 0 {
        return Err(CodecError::unsupported(format!(
            "DateTime {dt} is not representable in whole microseconds"
        )));
    }
    Ok(dt.and_utc().timestamp_micros())
}

pub fn datetime_from_ticks(ticks: i64) -> Result<NaiveDateTime> {
    DateTime::from_timestamp_micros(ticks)
        .map(|dt| dt.naive_utc())
        .ok_or_else(|| CodecError::malformed(format!("DateTime ticks {ticks} out of range")))
}
