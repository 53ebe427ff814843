//! Scan-global raw-value enum registry.

use rustc_hash::FxHashMap;

use crate::SemanticType;

/// Type name → raw storage type, discovered as enum headers are
/// scanned. Registration happens immediately at the header line,
/// independent of class boundaries, so any later field in the same
/// scan can resolve the enum's coercion.
#[derive(Clone, Debug, Default)]
pub struct EnumRawMap {
    raw_types: FxHashMap<String, SemanticType>,
}

impl EnumRawMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an enum's raw storage type. Re-registration replaces;
    /// the last declaration in source order wins.
    pub fn register(&mut self, name: impl Into<String>, raw: SemanticType) {
        self.raw_types.insert(name.into(), raw);
    }

    /// The raw storage type backing `name`, when it is a known enum.
    pub fn raw_type(&self, name: &str) -> Option<&SemanticType> {
        self.raw_types.get(name)
    }

    pub fn is_enum(&self, name: &str) -> bool {
        self.raw_types.contains_key(name)
    }
}
