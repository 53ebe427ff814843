//! Semantic type names, as a closed union.
//!
//! Every field's declared type resolves into one of these variants.
//! Named types stay unresolved in the model: whether `Status` is a
//! raw-value enum or a nested composite is decided at emission time
//! against the [`EnumRawMap`](crate::EnumRawMap), because enum headers
//! may appear anywhere in the source before the owning class closes.

/// A declared field type, stripped of optionality markers.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum SemanticType {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Bool,
    Str,
    Url,
    /// An untyped document value, kept as-is (`Any`).
    Raw,
    /// A homogeneous sequence: `[T]`.
    Array(Box<SemanticType>),
    /// An associative container: `[K: V]`. JSON keys are strings, so
    /// emission always produces string-keyed maps; the declared key
    /// type is kept for diagnostics.
    Map(Box<SemanticType>, Box<SemanticType>),
    /// A user-defined name: raw-value enum or nested composite,
    /// resolved at emission.
    Named(String),
}

impl SemanticType {
    /// Parse a declared type name with composite-literal brackets.
    pub fn parse(name: &str) -> Self {
        let name = name.trim();
        if let Some(inner) = name.strip_prefix('[').and_then(|n| n.strip_suffix(']')) {
            // `[K: V]` splits on the first top-level colon; `[T]` has none.
            if let Some(colon) = split_top_level_colon(inner) {
                let (key, value) = inner.split_at(colon);
                return Self::Map(
                    Box::new(Self::parse(key)),
                    Box::new(Self::parse(&value[1..])),
                );
            }
            return Self::Array(Box::new(Self::parse(inner)));
        }
        match name {
            "Int8" => Self::I8,
            "Int16" => Self::I16,
            "Int32" => Self::I32,
            "Int" | "Int64" => Self::I64,
            "UInt8" => Self::U8,
            "UInt16" => Self::U16,
            "UInt32" => Self::U32,
            "UInt" | "UInt64" => Self::U64,
            "Float" => Self::F32,
            "Double" => Self::F64,
            "Bool" => Self::Bool,
            "String" => Self::Str,
            "URL" => Self::Url,
            "Any" => Self::Raw,
            other => Self::Named(other.to_owned()),
        }
    }

    /// True for the scalar variants the archive codec has a dedicated
    /// primitive for.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Self::Array(_) | Self::Map(..) | Self::Named(_) | Self::Raw)
    }

    /// The user-defined name, when this is a named type.
    pub fn named(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            _ => None,
        }
    }
}

/// Byte offset of the first colon not nested inside brackets.
fn split_top_level_colon(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, b) in s.bytes().enumerate() {
        match b {
            b'[' => depth += 1,
            b']' => depth = depth.saturating_sub(1),
            b':' if depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}
