use crate::shape::ANY;
use crate::{
    ordered_fields, Codec, InstantiationProvider, Mapping, RecordName, SchemaProvider, Sequence,
    SequenceKind, TypeShape, Value,
};
use bintag_types::serde::{TaggedStream, TypeTag};
use bintag_types::{CodecError, Result};
use tracing::{debug, trace};

impl<'p, S, I> Codec<'p, S, I>
where
    S: SchemaProvider + ?Sized,
    I: InstantiationProvider + ?Sized,
{
    pub(super) fn decode_root(&self, bytes: &[u8], shape: &TypeShape) -> Result<Value> {
        let mut r = TaggedStream::from_bytes(bytes.to_vec());
        let value = self.decode_value(&mut r, shape)?;

        let trailing = r.remaining();
        if trailing > 0 && !self.opts.allow_trailing_bytes {
            return Err(CodecError::malformed(format!(
                "{trailing} trailing bytes after the top-level value"
            )));
        }
        debug!(r_len = r.cursor(), trailing, "Decoded value graph.");
        Ok(value)
    }

    fn decode_value(&self, r: &mut TaggedStream, shape: &TypeShape) -> Result<Value> {
        let tag = r.read_tag()?;
        trace!(?tag, ?shape, "Decoding.");
        match tag {
            TypeTag::Null => Ok(Value::Absent),
            TypeTag::Unknown => Err(CodecError::malformed(
                "Unknown tag where a value is expected",
            )),
            TypeTag::List => self.decode_sequence(r, shape),
            TypeTag::Dictionary => self.decode_mapping(r, shape),
            TypeTag::Object => match shape {
                TypeShape::Record(name) => self.decode_record(r, shape, name),
                _ => Err(mismatch(tag, shape)),
            },
            _ => match shape {
                TypeShape::Any => Ok(Value::Primitive(r.read_primitive(tag)?)),
                TypeShape::Primitive(kind) => Ok(Value::Primitive(r.read_primitive_as(tag, *kind)?)),
                TypeShape::Record(_) | TypeShape::Sequence { .. } | TypeShape::Mapping { .. } => {
                    Err(mismatch(tag, shape))
                }
            },
        }
    }

    fn decode_sequence(&self, r: &mut TaggedStream, shape: &TypeShape) -> Result<Value> {
        let (kind, element) = match shape {
            TypeShape::Sequence { kind, element } => (*kind, element.as_ref()),
            TypeShape::Any => (SequenceKind::List, &ANY),
            _ => return Err(mismatch(TypeTag::List, shape)),
        };

        let count = r.read_count()?;
        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            items.push(self.decode_value(r, element)?);
        }
        Ok(Value::Sequence(Sequence { kind, items }))
    }

    fn decode_mapping(&self, r: &mut TaggedStream, shape: &TypeShape) -> Result<Value> {
        let (key_shape, val_shape) = match shape {
            TypeShape::Mapping { key, value } => (key.as_ref(), value.as_ref()),
            TypeShape::Any => (&ANY, &ANY),
            _ => return Err(mismatch(TypeTag::Dictionary, shape)),
        };

        let count = r.read_count()?;
        let mut map = Mapping::new();
        for _ in 0..count {
            let key = self.decode_value(r, key_shape)?;
            let val = self.decode_value(r, val_shape)?;
            map.insert(key, val);
        }
        Ok(Value::Mapping(map))
    }

    fn decode_record(
        &self,
        r: &mut TaggedStream,
        shape: &TypeShape,
        name: &RecordName,
    ) -> Result<Value> {
        let descs = self.schema.describe_fields(name).ok_or_else(|| {
            CodecError::mismatch(format!("Record {name} has no described fields"))
        })?;

        let mut rec = self.inst.create(shape)?;
        for field in ordered_fields(&descs) {
            trace!(record = %name, field = %field.name, order = field.order, "Decoding field.");
            let val = self.decode_value(r, &field.declared)?;
            self.inst.set_field(&mut rec, field, val)?;
        }
        Ok(Value::Record(rec))
    }
}

fn mismatch(tag: TypeTag, shape: &TypeShape) -> CodecError {
    CodecError::mismatch(format!("Found {tag:?} where {shape:?} is declared"))
}
