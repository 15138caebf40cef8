use crate::{
    ordered_fields, Codec, InstantiationProvider, Mapping, Record, SchemaProvider, Sequence, Value,
};
use bintag_types::serde::{TaggedStream, TypeTag, WriteLen};
use bintag_types::{CodecError, Result};
use tracing::{debug, trace};

impl<'p, S, I> Codec<'p, S, I>
where
    S: SchemaProvider + ?Sized,
    I: InstantiationProvider + ?Sized,
{
    pub(super) fn encode_root(&self, value: &Value) -> Result<Vec<u8>> {
        let mut w = TaggedStream::with_capacity(self.opts.initial_capacity);
        let w_len = self.encode_value(&mut w, value)?;
        debug!(w_len = *w_len, "Encoded value graph.");
        Ok(w.into_bytes())
    }

    fn encode_value(&self, w: &mut TaggedStream, value: &Value) -> Result<WriteLen> {
        match value {
            Value::Absent => Ok(w.write_raw_tag(TypeTag::Null)),
            Value::Primitive(prim) => w.write_primitive(prim),
            Value::Mapping(map) => self.encode_mapping(w, map),
            Value::Sequence(seq) => self.encode_sequence(w, seq),
            Value::Record(rec) => self.encode_record(w, rec),
            Value::Opaque(type_name) => Err(CodecError::unsupported(format!(
                "{type_name} has no serializable representation"
            ))),
        }
    }

    fn encode_mapping(&self, w: &mut TaggedStream, map: &Mapping) -> Result<WriteLen> {
        let mut w_len = w.write_raw_tag(TypeTag::Dictionary);
        w_len += w.write_count("Dictionary", map.len())?;
        for (key, val) in map.iter() {
            w_len += self.encode_value(w, key)?;
            w_len += self.encode_value(w, val)?;
        }
        Ok(w_len)
    }

    fn encode_sequence(&self, w: &mut TaggedStream, seq: &Sequence) -> Result<WriteLen> {
        let mut w_len = w.write_raw_tag(TypeTag::List);
        w_len += w.write_count("List", seq.len())?;
        for item in seq.items.iter() {
            w_len += self.encode_value(w, item)?;
        }
        Ok(w_len)
    }

    fn encode_record(&self, w: &mut TaggedStream, rec: &Record) -> Result<WriteLen> {
        let descs = self.schema.describe_fields(rec.name()).ok_or_else(|| {
            CodecError::unsupported(format!("Record {} has no described fields", rec.name()))
        })?;

        let mut w_len = w.write_raw_tag(TypeTag::Object);
        for field in ordered_fields(&descs) {
            trace!(record = %rec.name(), field = %field.name, order = field.order, "Encoding field.");
            let val = self.inst.get_field(rec, field)?;
            w_len += self.encode_value(w, val)?;
        }
        Ok(w_len)
    }
}
