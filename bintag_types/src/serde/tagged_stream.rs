use crate::buffer::{self, ByteBuffer};
use crate::serde::{
    compact, datetime_from_ticks, datetime_to_ticks, CountByte, Deser, Primitive, PrimitiveKind,
    Ser, TypeTag, TypeTagInt,
};
use crate::{CodecError, Result};
use chrono::NaiveDateTime;
use derive_more::{Add, AddAssign, Deref, DerefMut, From, Into};
use std::mem;

/// Bytes produced by one write call.
#[derive(Deref, Add, AddAssign, PartialEq, Eq, Clone, Copy, Default, Debug)]
pub struct WriteLen(usize);
impl WriteLen {
    pub fn new_manual(i: usize) -> Self {
        Self(i)
    }
}

/// A [`ByteBuffer`] whose primitive writes are prefixed with their [`TypeTag`]
/// and compacted to the narrowest exact tag.
///
/// Dereferences to the underlying buffer for untagged access.
#[derive(From, Into, Deref, DerefMut, Default, Debug)]
pub struct TaggedStream {
    buf: ByteBuffer,
}

impl TaggedStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::from(ByteBuffer::with_capacity(capacity))
    }

    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self::from(ByteBuffer::from_bytes(data))
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf.into_bytes()
    }
}

/* Writes. */
impl TaggedStream {
    fn write_tag(&mut self, tag: TypeTag) -> WriteLen {
        self.buf.write_u8(*TypeTagInt::from(tag));
        WriteLen(mem::size_of::<TypeTagInt>())
    }

    /// Writes a bare tag byte with no payload. Used for the structural
    /// markers `Null`, `List`, `Object` and `Dictionary`.
    pub fn write_raw_tag(&mut self, tag: TypeTag) -> WriteLen {
        self.write_tag(tag)
    }

    pub fn write_count(&mut self, what: &'static str, len: usize) -> Result<WriteLen> {
        let count = CountByte::new(what, len)?;
        Ok(WriteLen(count.ser(&mut self.buf)))
    }

    /// Writes the value compacted to its narrowest exact tag.
    pub fn write_primitive(&mut self, prim: &Primitive) -> Result<WriteLen> {
        match prim {
            Primitive::Int16(_)
            | Primitive::Int32(_)
            | Primitive::Int64(_)
            | Primitive::Float(_)
            | Primitive::Double(_) => self.write_exact(&compact(prim.clone())),
            Primitive::Bool(_)
            | Primitive::Byte(_)
            | Primitive::DateTime(_)
            | Primitive::String(_) => self.write_exact(prim),
        }
    }

    /// Writes the value under its own kind's tag.
    fn write_exact(&mut self, prim: &Primitive) -> Result<WriteLen> {
        if let Primitive::String(s) = prim {
            return self.write_str(s);
        }
        if let Primitive::DateTime(dt) = prim {
            let ticks = datetime_to_ticks(dt)?;
            let w_len = self.write_tag(TypeTag::DateTime);
            self.buf.write_i64(ticks);
            return Ok(w_len + WriteLen(mem::size_of_val(&ticks)));
        }
        let mut w_len = self.write_tag(prim.kind().tag());
        let body_len = match prim {
            Primitive::Bool(b) => {
                self.buf.write_u8(u8::from(*b));
                mem::size_of::<u8>()
            }
            Primitive::Byte(i) => {
                self.buf.write_u8(*i);
                mem::size_of_val(i)
            }
            Primitive::Int16(i) => {
                self.buf.write_i16(*i);
                mem::size_of_val(i)
            }
            Primitive::Int32(i) => {
                self.buf.write_i32(*i);
                mem::size_of_val(i)
            }
            Primitive::Int64(i) => {
                self.buf.write_i64(*i);
                mem::size_of_val(i)
            }
            Primitive::Float(f) => {
                self.buf.write_f32(*f);
                mem::size_of_val(f)
            }
            Primitive::Double(f) => {
                self.buf.write_f64(*f);
                mem::size_of_val(f)
            }
            Primitive::DateTime(_) | Primitive::String(_) => 0,
        };
        w_len += WriteLen(body_len);
        Ok(w_len)
    }

    pub fn write_bool(&mut self, b: bool) -> Result<WriteLen> {
        self.write_primitive(&Primitive::Bool(b))
    }
    pub fn write_u8(&mut self, i: u8) -> Result<WriteLen> {
        self.write_primitive(&Primitive::Byte(i))
    }
    pub fn write_i16(&mut self, i: i16) -> Result<WriteLen> {
        self.write_primitive(&Primitive::Int16(i))
    }
    pub fn write_i32(&mut self, i: i32) -> Result<WriteLen> {
        self.write_primitive(&Primitive::Int32(i))
    }
    pub fn write_i64(&mut self, i: i64) -> Result<WriteLen> {
        self.write_primitive(&Primitive::Int64(i))
    }
    pub fn write_f32(&mut self, f: f32) -> Result<WriteLen> {
        self.write_primitive(&Primitive::Float(f))
    }
    pub fn write_f64(&mut self, f: f64) -> Result<WriteLen> {
        self.write_primitive(&Primitive::Double(f))
    }
    pub fn write_datetime(&mut self, dt: NaiveDateTime) -> Result<WriteLen> {
        self.write_primitive(&Primitive::DateTime(dt))
    }

    /// `String` tag, one length byte, then one byte per character.
    pub fn write_str(&mut self, s: &str) -> Result<WriteLen> {
        let body = buffer::latin1_encode(s)?;
        let count = CountByte::new("String", body.len())?;

        let mut w_len = self.write_tag(TypeTag::String);
        w_len += WriteLen(count.ser(&mut self.buf));
        self.buf.write_block(&body);
        w_len += WriteLen(body.len());
        Ok(w_len)
    }

    pub fn write<T: Ser + ?Sized>(&mut self, t: &T) -> Result<WriteLen> {
        t.ser(self)
    }
}

/* Reads. */
impl TaggedStream {
    pub fn read_tag(&mut self) -> Result<TypeTag> {
        let int = TypeTagInt::from(self.buf.read_u8()?);
        TypeTag::try_from(int)
    }

    /// Steps back over a tag that was read only to look at it.
    pub fn unread_tag(&mut self) -> Result<()> {
        let tag_len = mem::size_of::<TypeTagInt>() as i64;
        self.buf.seek(-tag_len, buffer::SeekOrigin::Current)?;
        Ok(())
    }

    pub fn read_count(&mut self) -> Result<usize> {
        Ok(CountByte::deser(&mut self.buf)?.get())
    }

    /// Reads the payload of an already-consumed primitive tag, in the tag's own kind.
    pub fn read_primitive(&mut self, tag: TypeTag) -> Result<Primitive> {
        let prim = match tag {
            TypeTag::Bool => Primitive::Bool(self.buf.read_u8()? != 0),
            TypeTag::Byte => Primitive::Byte(self.buf.read_u8()?),
            TypeTag::Int16 => Primitive::Int16(self.buf.read_i16()?),
            TypeTag::Int32 => Primitive::Int32(self.buf.read_i32()?),
            TypeTag::Int64 => Primitive::Int64(self.buf.read_i64()?),
            TypeTag::Float => Primitive::Float(self.buf.read_f32()?),
            TypeTag::Double => Primitive::Double(self.buf.read_f64()?),
            TypeTag::DateTime => {
                let ticks = self.buf.read_i64()?;
                Primitive::DateTime(datetime_from_ticks(ticks)?)
            }
            TypeTag::String => {
                let len = self.read_count()?;
                Primitive::String(self.buf.read_fixed_string(len)?)
            }
            TypeTag::Unknown => {
                return Err(CodecError::malformed("Unknown tag where a value is expected"))
            }
            TypeTag::Object | TypeTag::List | TypeTag::Null | TypeTag::Dictionary => {
                return Err(CodecError::mismatch(format!(
                    "Expected a primitive value, found a {tag:?} marker"
                )))
            }
        };
        Ok(prim)
    }

    /// Reads the payload of an already-consumed tag and converts it to `kind`.
    pub fn read_primitive_as(&mut self, tag: TypeTag, kind: PrimitiveKind) -> Result<Primitive> {
        self.read_primitive(tag)?.convert(kind)
    }

    /// Reads a tag and its payload, converted to `kind`.
    pub fn read_as(&mut self, kind: PrimitiveKind) -> Result<Primitive> {
        let tag = self.read_tag()?;
        self.read_primitive_as(tag, kind)
    }

    pub fn read<T: Deser>(&mut self) -> Result<T> {
        T::deser(self)
    }
}
