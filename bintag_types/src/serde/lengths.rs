use crate::buffer::ByteBuffer;
use crate::{CodecError, Result};
use derive_more::Deref;

/// The one-byte prefix in front of a string's bytes, a list's items, or a
/// dictionary's entries.
///
/// Anything longer than 255 is refused here rather than wrapped.
#[derive(Deref, PartialEq, Eq, Clone, Copy, Debug)]
pub struct CountByte(u8);
impl CountByte {
    pub const MAX: usize = u8::MAX as usize;

    pub fn new(what: &'static str, len: usize) -> Result<Self> {
        let int = u8::try_from(len).map_err(|_| CodecError::LengthOverflow {
            what,
            len,
            max: Self::MAX,
        })?;
        Ok(Self(int))
    }

    pub fn ser(&self, buf: &mut ByteBuffer) -> usize {
        buf.write_u8(self.0);
        1
    }

    pub fn deser(buf: &mut ByteBuffer) -> Result<Self> {
        Ok(Self(buf.read_u8()?))
    }

    pub fn get(&self) -> usize {
        usize::from(self.0)
    }
}
