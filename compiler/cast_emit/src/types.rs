//! Semantic-type mapping for emission.
//!
//! Two questions are answered here per field type: what Rust type the
//! struct member gets, and which decode/encode route the generated
//! routines take. Named types resolve against the scan's enum registry
//! at this point — an unregistered name is a nested composite.

use cast_ir::{EnumRawMap, SemanticType};

/// The coercion route a type takes through the runtime library.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ValueShape {
    /// Direct typed lookup through `FromValue`/`ToValue`. Carries the
    /// Rust type text for the turbofish.
    Coerce(String),
    /// Raw-value enum, bridged through the `EnumRaw` helpers.
    Enum(String),
    /// Nested composite, recursing through its own generated routines.
    Composite(String),
    /// Sequence of raw-value enums.
    EnumVec(String),
    /// Sequence of nested composites.
    CompositeVec(String),
    /// String-keyed map of nested composites.
    CompositeMap(String),
}

/// The Rust type text for a struct member of this semantic type
/// (before nullable wrapping).
pub fn rust_type(ty: &SemanticType, enums: &EnumRawMap) -> String {
    match ty {
        SemanticType::I8 => "i8".to_owned(),
        SemanticType::I16 => "i16".to_owned(),
        SemanticType::I32 => "i32".to_owned(),
        SemanticType::I64 => "i64".to_owned(),
        SemanticType::U8 => "u8".to_owned(),
        SemanticType::U16 => "u16".to_owned(),
        SemanticType::U32 => "u32".to_owned(),
        SemanticType::U64 => "u64".to_owned(),
        SemanticType::F32 => "f32".to_owned(),
        SemanticType::F64 => "f64".to_owned(),
        SemanticType::Bool => "bool".to_owned(),
        SemanticType::Str => "String".to_owned(),
        SemanticType::Url => "cast_value::Url".to_owned(),
        SemanticType::Raw => "Value".to_owned(),
        SemanticType::Array(inner) => format!("Vec<{}>", rust_type(inner, enums)),
        SemanticType::Map(_, value) => {
            // JSON object keys are strings regardless of the declared
            // key type.
            format!("std::collections::HashMap<String, {}>", rust_type(value, enums))
        }
        SemanticType::Named(name) => name.clone(),
    }
}

/// Classify the decode/encode route for a field type.
pub fn shape(ty: &SemanticType, enums: &EnumRawMap) -> ValueShape {
    match ty {
        SemanticType::Named(name) => {
            if enums.is_enum(name) {
                ValueShape::Enum(name.clone())
            } else {
                ValueShape::Composite(name.clone())
            }
        }
        SemanticType::Array(inner) => match inner.as_ref() {
            SemanticType::Named(name) => {
                if enums.is_enum(name) {
                    ValueShape::EnumVec(name.clone())
                } else {
                    ValueShape::CompositeVec(name.clone())
                }
            }
            _ => ValueShape::Coerce(rust_type(ty, enums)),
        },
        SemanticType::Map(_, value) => match value.as_ref() {
            SemanticType::Named(name) => ValueShape::CompositeMap(name.clone()),
            _ => ValueShape::Coerce(rust_type(ty, enums)),
        },
        _ => ValueShape::Coerce(rust_type(ty, enums)),
    }
}
