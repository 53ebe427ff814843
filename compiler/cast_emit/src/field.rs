//! Per-field expression fragments.
//!
//! Everything here returns expression text; statement assembly and
//! indentation live in the class emitter.

use cast_ir::{EnumRawMap, FieldSpec, SemanticType};

use crate::context::EmitOptions;
use crate::types::{rust_type, shape, ValueShape};

/// The struct-member type text, nullable wrapping applied.
pub fn member_type(field: &FieldSpec, enums: &EnumRawMap) -> String {
    let base = rust_type(&field.declared_type, enums);
    if field.nullable {
        format!("Option<{base}>")
    } else {
        base
    }
}

/// The document-side decode expression, evaluating to `Option<T>`.
pub fn decode_expr(field: &FieldSpec, enums: &EnumRawMap, options: &EmitOptions) -> String {
    if let Some(resolver) = &field.custom_resolver {
        return format!("Self::{resolver}(document)");
    }
    let path = field.key_paths.to_string();
    let base = match shape(&field.declared_type, enums) {
        ValueShape::Coerce(ty) => format!("document.value_path::<{ty}>({path:?})"),
        ValueShape::Enum(name) => format!(
            "document.any_path({path:?}).and_then(cast_value::enum_from_value::<{name}>)"
        ),
        ValueShape::Composite(name) => format!(
            "document.any_path({path:?}).and_then(cast_value::bindable_from_value::<{name}>)"
        ),
        ValueShape::EnumVec(name) => format!(
            "document.any_path({path:?}).and_then(cast_value::enum_vec_from_value::<{name}>)"
        ),
        ValueShape::CompositeVec(name) => format!(
            "document.any_path({path:?}).and_then(cast_value::bindable_vec_from_value::<{name}>)"
        ),
        ValueShape::CompositeMap(name) => format!(
            "document.any_path({path:?}).and_then(cast_value::bindable_map_from_value::<{name}>)"
        ),
    };
    if options.null_empty_string && field.declared_type == SemanticType::Str {
        format!("{base}.filter(|value| !value.is_empty())")
    } else {
        base
    }
}

/// The encode expression, evaluating to `Option<Value>`. Returning
/// absent omits the key.
pub fn encode_expr(field: &FieldSpec, enums: &EnumRawMap) -> String {
    let route = shape(&field.declared_type, enums);
    if field.nullable {
        format!(
            "self.{}.as_ref().and_then(|value| {})",
            field.name,
            encode_of("value", &route, false)
        )
    } else {
        encode_of(&format!("self.{}", field.name), &route, true)
    }
}

fn encode_of(receiver: &str, route: &ValueShape, needs_ref: bool) -> String {
    let amp = if needs_ref { "&" } else { "" };
    match route {
        ValueShape::Coerce(_) => format!("{receiver}.to_value()"),
        ValueShape::Enum(_) => format!("cast_value::enum_to_value({amp}{receiver})"),
        ValueShape::Composite(_) => format!("cast_value::bindable_to_value({amp}{receiver})"),
        ValueShape::EnumVec(_) => format!("cast_value::enum_vec_to_value({amp}{receiver})"),
        ValueShape::CompositeVec(_) => format!("cast_value::bindable_vec_to_value({amp}{receiver})"),
        ValueShape::CompositeMap(_) => format!("cast_value::bindable_map_to_value({amp}{receiver})"),
    }
}

/// Translate the declared default into Rust expression text. `nil`
/// has no expression form; callers fall back to absent/`Default`.
pub fn default_expr(field: &FieldSpec) -> Option<String> {
    let text = field.default_expression.as_deref()?.trim();
    match text {
        "nil" => None,
        "[]" => Some("Vec::new()".to_owned()),
        "[:]" => Some("std::collections::HashMap::new()".to_owned()),
        _ if text.starts_with('"') && field.declared_type == SemanticType::Str => {
            Some(format!("{text}.to_string()"))
        }
        _ if text.starts_with('.') => {
            // Leading-dot enumerator shorthand resolves against the
            // declared type name.
            match field.declared_type.named() {
                Some(name) => Some(format!("{name}::{}", &text[1..])),
                None => Some(text.to_owned()),
            }
        }
        _ => Some(text.to_owned()),
    }
}

/// Member initializer used where no document is in play: skipped
/// fields during construction, and the default-value constructor.
pub fn member_init(field: &FieldSpec) -> String {
    match default_expr(field) {
        Some(default) if field.nullable => format!("Some({default})"),
        Some(default) => default,
        None if field.nullable => "None".to_owned(),
        None => "Default::default()".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use cast_value::PathExpression;
    use pretty_assertions::assert_eq;

    use super::*;

    fn field(name: &str, ty: &str) -> FieldSpec {
        FieldSpec::new(name, SemanticType::parse(ty))
    }

    #[test]
    fn scalar_decode_uses_typed_lookup() {
        let enums = EnumRawMap::new();
        let options = EmitOptions::default();
        assert_eq!(
            decode_expr(&field("x", "Int"), &enums, &options),
            r#"document.value_path::<i64>("x")"#
        );
    }

    #[test]
    fn multi_alternative_path_is_preserved() {
        let enums = EnumRawMap::new();
        let options = EmitOptions::default();
        let mut f = field("home", "URL");
        f.key_paths = PathExpression::parse("profile/homeUrl ?? url");
        assert_eq!(
            decode_expr(&f, &enums, &options),
            r#"document.value_path::<cast_value::Url>("profile/homeUrl ?? url")"#
        );
    }

    #[test]
    fn enum_decode_routes_through_the_bridge() {
        let mut enums = EnumRawMap::new();
        enums.register("Status", SemanticType::I64);
        let options = EmitOptions::default();
        assert_eq!(
            decode_expr(&field("status", "Status"), &enums, &options),
            r#"document.any_path("status").and_then(cast_value::enum_from_value::<Status>)"#
        );
    }

    #[test]
    fn custom_resolver_replaces_the_path_lookup() {
        let enums = EnumRawMap::new();
        let options = EmitOptions::default();
        let mut f = field("color", "Int");
        f.custom_resolver = Some("parse_color".to_owned());
        assert_eq!(decode_expr(&f, &enums, &options), "Self::parse_color(document)");
    }

    #[test]
    fn null_empty_filters_strings_only() {
        let enums = EnumRawMap::new();
        let options = EmitOptions {
            null_empty_string: true,
            ..EmitOptions::default()
        };
        assert_eq!(
            decode_expr(&field("name", "String"), &enums, &options),
            r#"document.value_path::<String>("name").filter(|value| !value.is_empty())"#
        );
        assert_eq!(
            decode_expr(&field("x", "Int"), &enums, &options),
            r#"document.value_path::<i64>("x")"#
        );
    }

    #[test]
    fn nullable_encode_goes_through_as_ref() {
        let enums = EnumRawMap::new();
        let mut f = field("x", "Int");
        f.nullable = true;
        assert_eq!(
            encode_expr(&f, &enums),
            "self.x.as_ref().and_then(|value| value.to_value())"
        );
    }

    #[test]
    fn composite_vec_encode_uses_the_helper() {
        let enums = EnumRawMap::new();
        assert_eq!(
            encode_expr(&field("tags", "[Tag]"), &enums),
            "cast_value::bindable_vec_to_value(&self.tags)"
        );
    }

    #[test]
    fn default_translation() {
        let mut f = field("s", "String");
        f.default_expression = Some("\"hi\"".to_owned());
        assert_eq!(default_expr(&f), Some("\"hi\".to_string()".to_owned()));

        let mut f = field("v", "[Int]");
        f.default_expression = Some("[]".to_owned());
        assert_eq!(default_expr(&f), Some("Vec::new()".to_owned()));

        let mut f = field("status", "Status");
        f.default_expression = Some(".open".to_owned());
        assert_eq!(default_expr(&f), Some("Status::open".to_owned()));

        let mut f = field("x", "Int");
        f.default_expression = Some("nil".to_owned());
        assert_eq!(default_expr(&f), None);
    }

    #[test]
    fn member_init_variants() {
        let mut f = field("x", "Int");
        assert_eq!(member_init(&f), "Default::default()");
        f.nullable = true;
        assert_eq!(member_init(&f), "None");
        f.default_expression = Some("7".to_owned());
        assert_eq!(member_init(&f), "Some(7)");
        f.nullable = false;
        assert_eq!(member_init(&f), "7");
    }

    #[test]
    fn nullable_member_type_wraps_option() {
        let enums = EnumRawMap::new();
        let mut f = field("x", "Int");
        assert_eq!(member_type(&f, &enums), "i64");
        f.nullable = true;
        assert_eq!(member_type(&f, &enums), "Option<i64>");
    }
}
