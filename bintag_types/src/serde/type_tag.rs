use crate::serde::PrimitiveKind;
use crate::{CodecError, Result};
use derive_more::{Deref, From};
use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive, ToPrimitive};
use std::any;

/// The raw tag byte, before it is validated as a [`TypeTag`].
#[derive(From, Deref, PartialEq, Eq, Clone, Copy, Debug)]
pub struct TypeTagInt(u8);
impl From<TypeTag> for TypeTagInt {
    fn from(tag: TypeTag) -> Self {
        // Every discriminant is declared as a u8.
        let int = tag.to_u8().unwrap_or_default();
        Self(int)
    }
}

/// Discriminants are part of the wire format and must never be renumbered.
#[repr(u8)]
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, FromPrimitive, ToPrimitive, Debug)]
pub enum TypeTag {
    Unknown = 0,
    Bool = 1,
    Byte = 2,
    Int16 = 3,
    Int32 = 4,
    Int64 = 5,
    Float = 6,
    Double = 7,
    DateTime = 8,
    String = 9,
    Object = 10,
    List = 11,
    Null = 12,
    Dictionary = 13,
}
impl TryFrom<TypeTagInt> for TypeTag {
    type Error = CodecError;
    fn try_from(int: TypeTagInt) -> Result<Self> {
        TypeTag::from_u8(int.0).ok_or_else(|| {
            CodecError::malformed(format!(
                "Unknown {} {}",
                any::type_name::<TypeTagInt>(),
                int.0
            ))
        })
    }
}

impl TypeTag {
    /// Structural markers carry no primitive payload of their own.
    pub fn is_marker(self) -> bool {
        matches!(
            self,
            TypeTag::Object | TypeTag::List | TypeTag::Null | TypeTag::Dictionary
        )
    }

    /// The kind a primitive tag decodes to when no other kind is requested.
    pub fn natural_kind(self) -> Option<PrimitiveKind> {
        let kind = match self {
            TypeTag::Bool => PrimitiveKind::Bool,
            TypeTag::Byte => PrimitiveKind::Byte,
            TypeTag::Int16 => PrimitiveKind::Int16,
            TypeTag::Int32 => PrimitiveKind::Int32,
            TypeTag::Int64 => PrimitiveKind::Int64,
            TypeTag::Float => PrimitiveKind::Float,
            TypeTag::Double => PrimitiveKind::Double,
            TypeTag::DateTime => PrimitiveKind::DateTime,
            TypeTag::String => PrimitiveKind::String,
            TypeTag::Unknown
            | TypeTag::Object
            | TypeTag::List
            | TypeTag::Null
            | TypeTag::Dictionary => return None,
        };
        Some(kind)
    }
}
