//! Recursive encode and decode of value graphs over the tagged wire format
//! in [`bintag_types::serde`].

mod codec;
mod options;
mod registry;
mod schema;
mod shape;
mod value;

pub use codec::*;
pub use options::*;
pub use registry::*;
pub use schema::*;
pub use shape::*;
pub use value::*;

use bintag_types::Result;

/// Encodes with a provider that both describes and instantiates records.
pub fn encode<P>(provider: &P, value: &Value) -> Result<Vec<u8>>
where
    P: SchemaProvider + InstantiationProvider + ?Sized,
{
    Codec::new(provider, provider).encode(value)
}

pub fn decode<P>(provider: &P, bytes: &[u8], shape: &TypeShape) -> Result<Value>
where
    P: SchemaProvider + InstantiationProvider + ?Sized,
{
    Codec::new(provider, provider).decode(bytes, shape)
}
