//! # Serialization format
//!
//! Every encoded unit starts with a one-byte [`TypeTag`]. There is no overall
//! length prefix, magic number or version field. Fixed-width payloads are in
//! host byte order.
//!
//! Numeric values are compacted before they are written; see [`choose_tag`].
//! A reader therefore cannot assume the tag matches the writer's declared type,
//! and must convert the decoded value into the type it expects
//! (see [`Primitive::convert`]).
//!
//! ```text
//! struct Bool {
//!     type_tag:       u8,         // 1
//!     body:           u8,         // 0 or 1
//! }
//!
//! struct Byte | Int16 | Int32 | Int64 | Float | Double {
//!     type_tag:       u8,         // 2 ..= 7
//!     body:           [u8; 1 | 2 | 4 | 8 | 4 | 8],
//! }
//!
//! struct DateTime {
//!     type_tag:       u8,         // 8
//!     body:           i64,        // microseconds since 1970-01-01T00:00:00
//! }
//!
//! struct String {
//!     type_tag:       u8,         // 9
//!     body_len:       u8,         // at most 255
//!     body:           [u8; body_len],     // one Latin-1 byte per character
//! }
//!
//! struct Null {
//!     type_tag:       u8,         // 12
//! }
//!
//! struct List {
//!     type_tag:       u8,         // 11
//!     items_count:    u8,         // at most 255
//!     item_0:         Unit,       // any unit, including Null and nested containers
//!     ...
//! }
//!
//! struct Dictionary {
//!     type_tag:       u8,         // 13
//!     entries_count:  u8,         // at most 255
//!     key_0:          Unit,
//!     value_0:        Unit,
//!     ...
//! }
//!
//! struct Object {
//!     type_tag:       u8,         // 10
//!     field_0:        Unit,       // fields in ascending declared order
//!     field_1:        Unit,
//!     ...
//!     // No field count, no field names.
//!     // The reader must know the same field layout as the writer.
//! }
//! ```

mod compaction;
mod lengths;
mod primitive;
mod serializable;
mod tagged_stream;
mod type_tag;

pub use compaction::*;
pub use lengths::*;
pub use primitive::*;
pub use serializable::*;
pub use tagged_stream::*;
pub use type_tag::*;
