//! One declared field of a type.

use cast_value::PathExpression;

use crate::SemanticType;

/// The model record the emitter consumes per field.
///
/// Invariants the builder guarantees:
/// - `skip` true ⇒ no path or default processing happens for the
///   field; it stays a plain member of the type.
/// - `optional` false with no `default_expression` ⇒ a resolution
///   miss fails the whole construction, nullable storage or not.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldSpec {
    /// Field identifier.
    pub name: String,
    /// Declared semantic type, optionality markers stripped.
    pub declared_type: SemanticType,
    /// Absence is tolerated without failing construction (`?`).
    pub optional: bool,
    /// The stored value lives in nullable storage (`?` and `!`). A `!`
    /// field is nullable but not optional: it is stored as absent-able
    /// yet a resolution miss still fails construction.
    pub nullable: bool,
    /// `var` fields may be re-assigned by the non-failing updater.
    pub mutable: bool,
    /// Literal/expression text used when every path alternative fails.
    pub default_expression: Option<String>,
    /// Fallback chain of candidate paths; defaults to the field name.
    pub key_paths: PathExpression,
    /// Declared but excluded from all document marshaling.
    pub skip: bool,
    /// Kept for the archive codec, skipped for document marshaling.
    pub archive_only: bool,
    /// Name of a user-supplied resolver function, replacing the path
    /// resolver for this field.
    pub custom_resolver: Option<String>,
}

impl FieldSpec {
    /// A plain required field keyed by its own name. Builder entry
    /// point; directives and markers are layered on by the caller.
    pub fn new(name: impl Into<String>, declared_type: SemanticType) -> Self {
        let name = name.into();
        let key_paths = PathExpression::key(name.clone());
        Self {
            name,
            declared_type,
            optional: false,
            nullable: false,
            mutable: true,
            default_expression: None,
            key_paths,
            skip: false,
            archive_only: false,
            custom_resolver: None,
        }
    }

    /// A resolution miss on this field fails the whole construction.
    pub fn required(&self) -> bool {
        !self.optional && self.default_expression.is_none()
    }

    /// Participates in document marshaling at all.
    pub fn in_document(&self) -> bool {
        !self.skip && !self.archive_only
    }

    /// Participates in the archive codec.
    pub fn in_archive(&self) -> bool {
        !self.skip
    }
}
