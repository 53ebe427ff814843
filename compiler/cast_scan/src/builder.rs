//! Pure transformation from pattern captures to model records.
//!
//! No I/O and no state beyond the scan options: given the same
//! captures, the builder always produces the same specs.

use cast_ir::{ClassDirectives, ClassSpec, FieldSpec, SemanticType};
use cast_value::PathExpression;

use crate::patterns::{ClassHeader, FieldCapture};
use crate::ScanOptions;

/// Inheritance entries that are marker conformances, not generated
/// parents.
const MARKER_TRAITS: [&str; 2] = ["Bindable", "Codable"];

/// Open a class spec from a header capture. The first inheritance
/// entry that is not a marker trait becomes the generated parent.
pub fn build_class(header: ClassHeader, options: &ScanOptions) -> ClassSpec {
    let mut class = ClassSpec::new(header.name, header.kind);
    class.access = header.access;
    class.parent = header
        .inheritance
        .iter()
        .find(|entry| !MARKER_TRAITS.contains(&entry.as_str()))
        .cloned();
    if options.emit_updater {
        class.directives |= ClassDirectives::UPDATER;
    }
    if options.log_all {
        class.directives |= ClassDirectives::LOG;
    }
    class
}

/// Build a field spec from a field-line capture.
///
/// Optionality comes from the trailing marker on the type text: `?`
/// tolerates misses and stores nullable, `!` stores nullable but a
/// miss still fails construction. The effective key-path list is the
/// explicit override (or the field name), split on `??` then `/`,
/// with the configured casing transform applied per segment unless
/// the override carried the as-is marker.
pub fn build_field(capture: FieldCapture, options: &ScanOptions) -> FieldSpec {
    let type_text = capture.type_text.trim();
    let (stripped, optional, nullable) = match type_text.as_bytes().last() {
        Some(b'?') => (&type_text[..type_text.len() - 1], true, true),
        Some(b'!') => (&type_text[..type_text.len() - 1], false, true),
        _ => (type_text, false, false),
    };

    let mut field = FieldSpec::new(capture.name, SemanticType::parse(stripped));
    field.optional = optional;
    field.nullable = nullable;
    field.mutable = capture.mutable;
    field.default_expression = capture.default;
    field.skip = capture.skip;
    field.archive_only = capture.archive_only;
    field.custom_resolver = capture.custom_resolver;

    let (paths, as_is) = match capture.key_override {
        Some((text, as_is)) => (PathExpression::parse(&text), as_is),
        None => (field.key_paths.clone(), false),
    };
    field.key_paths = if as_is { paths } else { apply_casing(&paths, options) };
    field
}

fn apply_casing(paths: &PathExpression, options: &ScanOptions) -> PathExpression {
    // Ignore-case wins over the capitalized convention.
    if options.lowercase_keys {
        paths.map_keys(str::to_lowercase)
    } else if options.capitalize_keys {
        paths.map_keys(capitalize_first)
    } else {
        paths.clone()
    }
}

fn capitalize_first(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
