//! Numeric compaction: every number is written with the narrowest tag that
//! represents it exactly.
//!
//! Integers cascade `Byte (0..=255) -> Int16 -> Int32 -> own width`.
//! Floats take the same cascade when they are integral, and keep their own tag
//! when they are fractional, non-finite, negative zero, or beyond `Int32`.
//! Decoding the compacted form back into the source kind always yields the
//! source value bit for bit.

use crate::serde::{Primitive, TypeTag};

/// The tag [`crate::serde::TaggedStream`] will emit for this value.
pub fn choose_tag(prim: &Primitive) -> TypeTag {
    match narrowed(prim) {
        Some(narrow) => narrow.kind().tag(),
        None => prim.kind().tag(),
    }
}

/// The value as it travels on the wire.
pub fn compact(prim: Primitive) -> Primitive {
    narrowed(&prim).unwrap_or(prim)
}

/// A strictly narrower exact representation, if there is one.
fn narrowed(prim: &Primitive) -> Option<Primitive> {
    match prim {
        Primitive::Int16(i) => narrow_int(i64::from(*i)),
        Primitive::Int32(i) => narrow_int(i64::from(*i)),
        Primitive::Int64(i) => narrow_int(*i),
        Primitive::Float(f) => narrow_float(f64::from(*f)),
        Primitive::Double(f) => narrow_float(*f),
        Primitive::Bool(_)
        | Primitive::Byte(_)
        | Primitive::DateTime(_)
        | Primitive::String(_) => None,
    }
    .filter(|narrow| narrow.kind() != prim.kind())
}

fn narrow_int(i: i64) -> Option<Primitive> {
    if let Ok(b) = u8::try_from(i) {
        Some(Primitive::Byte(b))
    } else if let Ok(s) = i16::try_from(i) {
        Some(Primitive::Int16(s))
    } else if let Ok(w) = i32::try_from(i) {
        Some(Primitive::Int32(w))
    } else {
        None
    }
}

fn narrow_float(f: f64) -> Option<Primitive> {
    let is_integral = f.round() == f;
    let is_neg_zero = f == 0.0 && f.is_sign_negative();
    let in_int32_range = (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&f);
    if is_integral && !is_neg_zero && in_int32_range {
        narrow_int(f as i64)
    } else {
        None
    }
}
