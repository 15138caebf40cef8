//! Hand-written serialization, for types that lay themselves out on a
//! [`TaggedStream`] directly instead of going through a schema.

use crate::serde::{Primitive, PrimitiveKind, TaggedStream, TypeTag, WriteLen};
use crate::{CodecError, Result};
use chrono::NaiveDateTime;
use std::any;

pub trait Ser {
    fn ser(&self, w: &mut TaggedStream) -> Result<WriteLen>;

    fn ser_solo(&self) -> Result<Vec<u8>> {
        let mut w = TaggedStream::new();
        self.ser(&mut w)?;
        Ok(w.into_bytes())
    }
}
pub trait Deser: Sized {
    fn deser(r: &mut TaggedStream) -> Result<Self>;

    fn deser_solo(buf: &[u8]) -> Result<Self> {
        let mut r = TaggedStream::from_bytes(buf.to_vec());
        let moi = Self::deser(&mut r)?;
        if r.remaining() != 0 {
            return Err(CodecError::malformed(format!(
                "{} trailing bytes after {}",
                r.remaining(),
                any::type_name::<Self>()
            )));
        }
        Ok(moi)
    }
}

/* Primitive impls. */
macro_rules! impl_primitive_serde {
    ($t:ty, $variant:ident) => {
        impl Ser for $t {
            fn ser(&self, w: &mut TaggedStream) -> Result<WriteLen> {
                w.write_primitive(&Primitive::$variant(*self))
            }
        }
        impl Deser for $t {
            fn deser(r: &mut TaggedStream) -> Result<Self> {
                match r.read_as(PrimitiveKind::$variant)? {
                    Primitive::$variant(v) => Ok(v),
                    other => Err(unexpected::<Self>(&other)),
                }
            }
        }
    };
}
impl_primitive_serde!(bool, Bool);
impl_primitive_serde!(u8, Byte);
impl_primitive_serde!(i16, Int16);
impl_primitive_serde!(i32, Int32);
impl_primitive_serde!(i64, Int64);
impl_primitive_serde!(f32, Float);
impl_primitive_serde!(f64, Double);
impl_primitive_serde!(NaiveDateTime, DateTime);

impl Ser for str {
    fn ser(&self, w: &mut TaggedStream) -> Result<WriteLen> {
        w.write_str(self)
    }
}
impl Ser for String {
    fn ser(&self, w: &mut TaggedStream) -> Result<WriteLen> {
        w.write_str(self)
    }
}
impl Deser for String {
    fn deser(r: &mut TaggedStream) -> Result<Self> {
        match r.read_as(PrimitiveKind::String)? {
            Primitive::String(s) => Ok(s),
            other => Err(unexpected::<Self>(&other)),
        }
    }
}

fn unexpected<T>(prim: &Primitive) -> CodecError {
    CodecError::mismatch(format!(
        "{prim:?} while reading {}",
        any::type_name::<T>()
    ))
}

/* Absent values travel as the `Null` marker. */
impl<T: Ser> Ser for Option<T> {
    fn ser(&self, w: &mut TaggedStream) -> Result<WriteLen> {
        match self {
            None => Ok(w.write_raw_tag(TypeTag::Null)),
            Some(t) => t.ser(w),
        }
    }
}
impl<T: Deser> Deser for Option<T> {
    fn deser(r: &mut TaggedStream) -> Result<Self> {
        if r.read_tag()? == TypeTag::Null {
            return Ok(None);
        }
        r.unread_tag()?;
        Ok(Some(T::deser(r)?))
    }
}

/* Sequences travel as `List`, count, items. */
impl<T: Ser> Ser for [T] {
    fn ser(&self, w: &mut TaggedStream) -> Result<WriteLen> {
        let mut w_len = w.write_raw_tag(TypeTag::List);
        w_len += w.write_count("List", self.len())?;
        for item in self {
            w_len += item.ser(w)?;
        }
        Ok(w_len)
    }
}
impl<T: Ser> Ser for Vec<T> {
    fn ser(&self, w: &mut TaggedStream) -> Result<WriteLen> {
        self.as_slice().ser(w)
    }
}
impl<T: Deser> Deser for Vec<T> {
    fn deser(r: &mut TaggedStream) -> Result<Self> {
        match r.read_tag()? {
            TypeTag::List => {}
            tag => {
                return Err(CodecError::mismatch(format!(
                    "{tag:?} while reading {}",
                    any::type_name::<Self>()
                )))
            }
        }
        let count = r.read_count()?;
        (0..count).map(|_| T::deser(r)).collect()
    }
}
