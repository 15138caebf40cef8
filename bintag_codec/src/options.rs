use bintag_types::buffer::ByteBuffer;

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct CodecOptions {
    /// Starting capacity of the buffer each encode call writes into.
    pub initial_capacity: usize,
    /// Whether decode tolerates bytes after the top-level unit.
    pub allow_trailing_bytes: bool,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            initial_capacity: ByteBuffer::DEFAULT_CAPACITY,
            allow_trailing_bytes: false,
        }
    }
}
