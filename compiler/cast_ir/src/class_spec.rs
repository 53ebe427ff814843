//! One declared type, plus the directive state scanned from its body.

use bitflags::bitflags;

use crate::FieldSpec;

/// `struct` declarations are value kinds, `class` declarations are
/// reference kinds. Archive codecs are only emitted for reference
/// kinds.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ClassKind {
    Value,
    Reference,
}

/// Declared access level, mapped to Rust visibility at emission.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum AccessLevel {
    Public,
    #[default]
    Internal,
    Private,
}

impl AccessLevel {
    pub fn parse(word: &str) -> Option<Self> {
        match word {
            "public" => Some(Self::Public),
            "internal" => Some(Self::Internal),
            "private" => Some(Self::Private),
            _ => None,
        }
    }
}

bitflags! {
    /// Per-class directive flags collected while scanning the body.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub struct ClassDirectives: u8 {
        /// `//! archive` — emit the archive codec pair.
        const ARCHIVE = 1 << 0;
        /// `//! init` — emit a default-value constructor.
        const DEFAULT_CONSTRUCTOR = 1 << 1;
        /// `//! hook` — invoke `awake_with` after construction.
        const HOOK = 1 << 2;
        /// `//! dynamic` — emit the dynamic-runtime bridge.
        const DYNAMIC = 1 << 3;
        /// `//! log` — log per-field resolution misses.
        const LOG = 1 << 4;
        /// Emit the in-place updater (CLI switch).
        const UPDATER = 1 << 5;
    }
}

/// How a generated parent participates in the document shape.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum ParentStrategy {
    /// Parent fields share the subtype's document level.
    #[default]
    FlatMerge,
    /// Parent document nests under this key (`//! super "tag"`).
    NestedUnderTag(String),
}

/// One declared type, handed to the emitter when its closing brace
/// returns the scanner to the top level.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassSpec {
    pub name: String,
    /// Generated parent type, when the inheritance list names one
    /// (marker traits are not parents).
    pub parent: Option<String>,
    pub kind: ClassKind,
    pub access: AccessLevel,
    pub fields: Vec<FieldSpec>,
    pub directives: ClassDirectives,
    pub parent_strategy: ParentStrategy,
}

impl ClassSpec {
    pub fn new(name: impl Into<String>, kind: ClassKind) -> Self {
        Self {
            name: name.into(),
            parent: None,
            kind,
            access: AccessLevel::default(),
            fields: Vec::new(),
            directives: ClassDirectives::default(),
            parent_strategy: ParentStrategy::default(),
        }
    }

    /// Archive codecs require the directive and a reference kind.
    pub fn wants_archive(&self) -> bool {
        self.directives.contains(ClassDirectives::ARCHIVE) && self.kind == ClassKind::Reference
    }
}
