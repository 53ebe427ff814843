//! In-memory model of scanned declarations.
//!
//! The scanner produces one [`ClassSpec`] per declared type (with its
//! [`FieldSpec`]s) and registers raw-value enums into the scan-global
//! [`EnumRawMap`]. The emitter consumes a `ClassSpec` the moment its
//! closing brace is seen; no model object outlives the scan of its own
//! declaration.

mod class_spec;
mod enum_map;
mod field_spec;
mod semantic_type;

pub use class_spec::{AccessLevel, ClassDirectives, ClassKind, ClassSpec, ParentStrategy};
pub use enum_map::EnumRawMap;
pub use field_spec::FieldSpec;
pub use semantic_type::SemanticType;
