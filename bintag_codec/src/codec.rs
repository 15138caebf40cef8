use crate::{CodecOptions, InstantiationProvider, SchemaProvider, TypeShape, Value};
use bintag_types::Result;

mod decode;
mod encode;

/// Recursive encoder and decoder of [`Value`] graphs.
///
/// Holds no state between calls; every call works on its own buffer, so one
/// `Codec` can serve many threads at once.
pub struct Codec<'p, S: ?Sized, I: ?Sized> {
    schema: &'p S,
    inst: &'p I,
    opts: CodecOptions,
}

impl<'p, S, I> Codec<'p, S, I>
where
    S: SchemaProvider + ?Sized,
    I: InstantiationProvider + ?Sized,
{
    pub fn new(schema: &'p S, inst: &'p I) -> Self {
        Self {
            schema,
            inst,
            opts: CodecOptions::default(),
        }
    }

    pub fn with_options(mut self, opts: CodecOptions) -> Self {
        self.opts = opts;
        self
    }

    pub fn encode(&self, value: &Value) -> Result<Vec<u8>> {
        self.encode_root(value)
    }

    pub fn decode(&self, bytes: &[u8], shape: &TypeShape) -> Result<Value> {
        self.decode_root(bytes, shape)
    }
}
