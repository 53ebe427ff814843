//! Class-level emission: struct definition plus generated routines.
//!
//! Routine set per class, gated by directives:
//!
//! - struct definition (always)
//! - `impl Bindable`: `from_document` + `represent` (always)
//! - `impl BindableUpdate`: `update` (updater switch)
//! - inherent impl: default constructor (`init`), archive codec
//!   (`archive` on reference kinds), dynamic-registry bridge
//!   (`dynamic`)
//!
//! Generated code leans entirely on the `cast_value` runtime crate and
//! compiles inside any crate that depends on it.

use cast_ir::{AccessLevel, ClassDirectives, ClassSpec, EnumRawMap, FieldSpec, ParentStrategy, SemanticType};
use tracing::debug;

use crate::context::EmitContext;
use crate::field::{decode_expr, default_expr, encode_expr, member_init, member_type};
use crate::types::{shape, ValueShape};

/// Emit the do-not-edit banner naming the source file.
pub fn emit_banner(ctx: &mut EmitContext<'_>) {
    let source = ctx.options.source_name.clone();
    if source.is_empty() {
        ctx.writeln("// Generated by cast. Do not edit; regenerate instead.");
    } else {
        ctx.writeln(&format!(
            "// Generated by cast from {source}. Do not edit; regenerate instead."
        ));
    }
}

/// Emit the `use` injection block, unless suppressed.
pub fn emit_imports(ctx: &mut EmitContext<'_>) {
    if ctx.options.suppress_imports {
        return;
    }
    ctx.newline();
    ctx.writeln("use serde_json::Value;");
    ctx.newline();
    ctx.writeln("#[allow(unused_imports)]");
    ctx.writeln(
        "use cast_value::{ArchiveSink, ArchiveSource, Bindable, BindableUpdate, Document, ToValue};",
    );
}

/// Emit one class: struct definition and every directive-selected
/// routine, in a stable order.
pub fn emit_class(ctx: &mut EmitContext<'_>, class: &ClassSpec, enums: &EnumRawMap) {
    debug!(name = %class.name, fields = class.fields.len(), "emitting class");

    ctx.newline();
    emit_struct(ctx, class, enums);

    let wants_init = class.directives.contains(ClassDirectives::DEFAULT_CONSTRUCTOR);
    let wants_dynamic = class.directives.contains(ClassDirectives::DYNAMIC);
    if wants_init || wants_dynamic || class.wants_archive() {
        ctx.newline();
        ctx.writeln(&format!("impl {} {{", class.name));
        ctx.indent();
        let mut first = true;
        if wants_init {
            emit_new(ctx, class);
            first = false;
        }
        if class.wants_archive() {
            if !first {
                ctx.newline();
            }
            emit_archive_encode(ctx, class, enums);
            ctx.newline();
            emit_archive_decode(ctx, class, enums);
            first = false;
        }
        if wants_dynamic {
            if !first {
                ctx.newline();
            }
            emit_dynamic_bridge(ctx, class);
        }
        ctx.dedent();
        ctx.writeln("}");
    }
    if wants_init {
        ctx.newline();
        emit_default_impl(ctx, class);
    }

    ctx.newline();
    emit_bindable_impl(ctx, class, enums);

    if class.directives.contains(ClassDirectives::UPDATER) {
        ctx.newline();
        emit_update_impl(ctx, class, enums);
    }
}

fn visibility(access: AccessLevel) -> &'static str {
    match access {
        AccessLevel::Public => "pub ",
        AccessLevel::Internal => "pub(crate) ",
        AccessLevel::Private => "",
    }
}

fn emit_struct(ctx: &mut EmitContext<'_>, class: &ClassSpec, enums: &EnumRawMap) {
    let vis = visibility(class.access);
    ctx.writeln("#[derive(Clone, Debug)]");
    ctx.writeln(&format!("{vis}struct {} {{", class.name));
    ctx.indent();
    if let Some(parent) = &class.parent {
        ctx.writeln(&format!("{vis}base: {parent},"));
    }
    for field in &class.fields {
        ctx.writeln(&format!("{vis}{}: {},", field.name, member_type(field, enums)));
    }
    ctx.dedent();
    ctx.writeln("}");
}

fn struct_literal(class: &ClassSpec) -> String {
    let mut names: Vec<&str> = Vec::with_capacity(class.fields.len() + 1);
    if class.parent.is_some() {
        names.push("base");
    }
    names.extend(class.fields.iter().map(|f| f.name.as_str()));
    names.join(", ")
}

fn emit_bindable_impl(ctx: &mut EmitContext<'_>, class: &ClassSpec, enums: &EnumRawMap) {
    ctx.writeln(&format!("impl Bindable for {} {{", class.name));
    ctx.indent();
    emit_from_document(ctx, class, enums);
    ctx.newline();
    emit_represent(ctx, class, enums);
    ctx.dedent();
    ctx.writeln("}");
}

fn emit_from_document(ctx: &mut EmitContext<'_>, class: &ClassSpec, enums: &EnumRawMap) {
    ctx.writeln("fn from_document(document: &Value) -> Option<Self> {");
    ctx.indent();
    if ctx.options.ignore_case {
        ctx.writeln("let document = &document.lowercased_keys();");
    }
    if let Some(parent) = &class.parent {
        match &class.parent_strategy {
            ParentStrategy::FlatMerge => {
                ctx.writeln(&format!("let base = {parent}::from_document(document)?;"));
            }
            ParentStrategy::NestedUnderTag(tag) => {
                ctx.writeln(&format!(
                    "let base = document.any_path({tag:?}).and_then(cast_value::bindable_from_value::<{parent}>)?;"
                ));
            }
        }
    }
    for field in &class.fields {
        emit_construct_binding(ctx, class, field, enums);
    }
    let literal = struct_literal(class);
    if class.directives.contains(ClassDirectives::HOOK) {
        ctx.writeln(&format!("let mut value = Self {{ {literal} }};"));
        ctx.writeln("if !value.awake_with(document) {");
        ctx.indent();
        ctx.writeln("return None;");
        ctx.dedent();
        ctx.writeln("}");
        ctx.writeln("Some(value)");
    } else {
        ctx.writeln(&format!("Some(Self {{ {literal} }})"));
    }
    ctx.dedent();
    ctx.writeln("}");
}

fn emit_construct_binding(
    ctx: &mut EmitContext<'_>,
    class: &ClassSpec,
    field: &FieldSpec,
    enums: &EnumRawMap,
) {
    let name = &field.name;
    if !field.in_document() {
        ctx.writeln(&format!("let {name} = {};", member_init(field)));
        return;
    }
    let base = decode_expr(field, enums, ctx.options);
    let logged = class.directives.contains(ClassDirectives::LOG);
    if field.required() {
        if logged {
            ctx.writeln(&format!("let Some({name}) = {base} else {{"));
            ctx.indent();
            ctx.writeln(&miss_log_line(class, field));
            ctx.writeln("return None;");
            ctx.dedent();
            ctx.writeln("};");
            if field.nullable {
                ctx.writeln(&format!("let {name} = Some({name});"));
            }
        } else if field.nullable {
            ctx.writeln(&format!("let {name} = Some({base}?);"));
        } else {
            ctx.writeln(&format!("let {name} = {base}?;"));
        }
    } else if logged {
        // Non-fatal misses are reported before the default applies.
        ctx.writeln(&format!("let {name} = {base}.or_else(|| {{"));
        ctx.indent();
        ctx.writeln(&miss_log_line(class, field));
        ctx.writeln("None");
        ctx.dedent();
        if let Some(default) = default_expr(field) {
            if field.nullable {
                ctx.writeln(&format!("}}).or_else(|| Some({default}));"));
            } else {
                ctx.writeln(&format!("}}).unwrap_or_else(|| {default});"));
            }
        } else if field.default_expression.is_some() && !field.nullable {
            ctx.writeln("}).unwrap_or_default();");
        } else {
            ctx.writeln("});");
        }
    } else if let Some(default) = default_expr(field) {
        if field.nullable {
            ctx.writeln(&format!("let {name} = {base}.or_else(|| Some({default}));"));
        } else {
            ctx.writeln(&format!("let {name} = {base}.unwrap_or_else(|| {default});"));
        }
    } else if field.default_expression.is_some() && !field.nullable {
        // `nil` default on non-nullable storage.
        ctx.writeln(&format!("let {name} = {base}.unwrap_or_default();"));
    } else {
        ctx.writeln(&format!("let {name} = {base};"));
    }
}

fn miss_log_line(class: &ClassSpec, field: &FieldSpec) -> String {
    format!(
        "cast_value::log_resolution_miss({:?}, {:?}, {:?});",
        class.name,
        field.name,
        field.key_paths.to_string()
    )
}

fn emit_represent(ctx: &mut EmitContext<'_>, class: &ClassSpec, enums: &EnumRawMap) {
    ctx.writeln("fn represent(&self) -> Value {");
    ctx.indent();
    match (&class.parent, &class.parent_strategy) {
        (Some(_), ParentStrategy::FlatMerge) => {
            ctx.writeln("let mut document = self.base.represent();");
        }
        (Some(_), ParentStrategy::NestedUnderTag(tag)) => {
            ctx.writeln("let mut document = Value::Object(serde_json::Map::new());");
            ctx.writeln(&format!(
                "cast_value::insert_at(&mut document, &cast_value::KeyPath::key({tag:?}), self.base.represent());"
            ));
        }
        (None, _) => {
            ctx.writeln("let mut document = Value::Object(serde_json::Map::new());");
        }
    }
    for field in class.fields.iter().filter(|f| f.in_document()) {
        let encode = encode_expr(field, enums);
        let primary = field.key_paths.primary();
        let target = if field.key_paths.is_bare_key() {
            format!("&cast_value::KeyPath::key({:?})", primary.segments[0].key)
        } else {
            format!("&cast_value::KeyPath::parse({:?})", primary.to_string())
        };
        ctx.writeln(&format!("if let Some(value) = {encode} {{"));
        ctx.indent();
        ctx.writeln(&format!("cast_value::insert_at(&mut document, {target}, value);"));
        ctx.dedent();
        ctx.writeln("}");
    }
    ctx.writeln("document");
    ctx.dedent();
    ctx.writeln("}");
}

fn emit_update_impl(ctx: &mut EmitContext<'_>, class: &ClassSpec, enums: &EnumRawMap) {
    let updatable: Vec<&FieldSpec> = class
        .fields
        .iter()
        .filter(|f| f.in_document() && f.mutable)
        .collect();
    ctx.writeln(&format!("impl BindableUpdate for {} {{", class.name));
    ctx.indent();
    if updatable.is_empty() && class.parent.is_none() {
        ctx.writeln("fn update(&mut self, _document: &Value) {}");
        ctx.dedent();
        ctx.writeln("}");
        return;
    }
    ctx.writeln("fn update(&mut self, document: &Value) {");
    ctx.indent();
    if ctx.options.ignore_case {
        ctx.writeln("let document = &document.lowercased_keys();");
    }
    if class.parent.is_some() {
        match &class.parent_strategy {
            ParentStrategy::FlatMerge => ctx.writeln("self.base.update(document);"),
            ParentStrategy::NestedUnderTag(tag) => {
                ctx.writeln(&format!("if let Some(nested) = document.any_path({tag:?}) {{"));
                ctx.indent();
                ctx.writeln("self.base.update(nested);");
                ctx.dedent();
                ctx.writeln("}");
            }
        }
    }
    for field in updatable {
        let base = decode_expr(field, enums, ctx.options);
        ctx.writeln(&format!("if let Some(value) = {base} {{"));
        ctx.indent();
        if field.nullable {
            ctx.writeln(&format!("self.{} = Some(value);", field.name));
        } else {
            ctx.writeln(&format!("self.{} = value;", field.name));
        }
        ctx.dedent();
        ctx.writeln("}");
    }
    ctx.dedent();
    ctx.writeln("}");
    ctx.dedent();
    ctx.writeln("}");
}

fn emit_new(ctx: &mut EmitContext<'_>, class: &ClassSpec) {
    let vis = visibility(class.access);
    ctx.writeln("/// Construct with declared defaults.");
    ctx.writeln(&format!("{vis}fn new() -> Self {{"));
    ctx.indent();
    ctx.writeln("Self {");
    ctx.indent();
    if class.parent.is_some() {
        ctx.writeln("base: Default::default(),");
    }
    for field in &class.fields {
        ctx.writeln(&format!("{}: {},", field.name, member_init(field)));
    }
    ctx.dedent();
    ctx.writeln("}");
    ctx.dedent();
    ctx.writeln("}");
}

fn emit_default_impl(ctx: &mut EmitContext<'_>, class: &ClassSpec) {
    ctx.writeln(&format!("impl Default for {} {{", class.name));
    ctx.indent();
    ctx.writeln("fn default() -> Self {");
    ctx.indent();
    ctx.writeln("Self::new()");
    ctx.dedent();
    ctx.writeln("}");
    ctx.dedent();
    ctx.writeln("}");
}

fn emit_dynamic_bridge(ctx: &mut EmitContext<'_>, class: &ClassSpec) {
    let vis = visibility(class.access);
    ctx.writeln("/// Register this type for by-name construction.");
    ctx.writeln(&format!(
        "{vis}fn register_dynamic(registry: &mut cast_value::DynamicRegistry) {{"
    ));
    ctx.indent();
    ctx.writeln(&format!("registry.register({:?}, |document| {{", class.name));
    ctx.indent();
    ctx.writeln(
        "Self::from_document(document).map(|value| Box::new(value) as Box<dyn std::any::Any>)",
    );
    ctx.dedent();
    ctx.writeln("});");
    ctx.dedent();
    ctx.writeln("}");
}

/// The typed sink call for a scalar archive field. `receiver` already
/// carries the right form (value for Copy scalars, reference for
/// strings).
fn scalar_encode_line(ty: &SemanticType, receiver: &str, key: &str) -> String {
    match ty {
        SemanticType::I8 | SemanticType::I16 | SemanticType::I32 => {
            format!("sink.encode_i64(i64::from({receiver}), {key:?});")
        }
        SemanticType::I64 => format!("sink.encode_i64({receiver}, {key:?});"),
        SemanticType::U8 | SemanticType::U16 | SemanticType::U32 => {
            format!("sink.encode_u64(u64::from({receiver}), {key:?});")
        }
        SemanticType::U64 => format!("sink.encode_u64({receiver}, {key:?});"),
        SemanticType::F32 => format!("sink.encode_f64(f64::from({receiver}), {key:?});"),
        SemanticType::F64 => format!("sink.encode_f64({receiver}, {key:?});"),
        SemanticType::Bool => format!("sink.encode_bool({receiver}, {key:?});"),
        SemanticType::Str => format!("sink.encode_str({receiver}, {key:?});"),
        SemanticType::Url => format!("sink.encode_str({receiver}.as_str(), {key:?});"),
        _ => unreachable!("non-scalar routed through encode_value"),
    }
}

fn emit_archive_encode(ctx: &mut EmitContext<'_>, class: &ClassSpec, enums: &EnumRawMap) {
    let vis = visibility(class.access);
    ctx.writeln("/// Encode into a keyed archive.");
    ctx.writeln(&format!(
        "{vis}fn archive_encode(&self, sink: &mut impl ArchiveSink) {{"
    ));
    ctx.indent();
    if class.parent.is_some() {
        ctx.writeln("sink.encode_value(self.base.represent(), \"super\");");
    }
    for field in class.fields.iter().filter(|f| f.in_archive()) {
        let name = &field.name;
        if field.declared_type.is_scalar() {
            let by_ref = matches!(field.declared_type, SemanticType::Str | SemanticType::Url);
            if field.nullable {
                let source = if by_ref {
                    format!("&self.{name}")
                } else {
                    format!("self.{name}")
                };
                ctx.writeln(&format!("if let Some(value) = {source} {{"));
                ctx.indent();
                ctx.writeln(&scalar_encode_line(&field.declared_type, "value", name));
                ctx.dedent();
                ctx.writeln("}");
            } else {
                let receiver = if matches!(field.declared_type, SemanticType::Str) {
                    format!("&self.{name}")
                } else {
                    format!("self.{name}")
                };
                ctx.writeln(&scalar_encode_line(&field.declared_type, &receiver, name));
            }
        } else {
            let encode = encode_expr(field, enums);
            ctx.writeln(&format!("if let Some(value) = {encode} {{"));
            ctx.indent();
            ctx.writeln(&format!("sink.encode_value(value, {name:?});"));
            ctx.dedent();
            ctx.writeln("}");
        }
    }
    ctx.dedent();
    ctx.writeln("}");
}

/// The archive-side decode expression, evaluating to `Option<T>`.
fn archive_decode_expr(field: &FieldSpec, enums: &EnumRawMap) -> String {
    let key = &field.name;
    match &field.declared_type {
        SemanticType::I64 => format!("source.decode_i64({key:?})"),
        SemanticType::I8 => format!("source.decode_i64({key:?}).and_then(|value| i8::try_from(value).ok())"),
        SemanticType::I16 => format!("source.decode_i64({key:?}).and_then(|value| i16::try_from(value).ok())"),
        SemanticType::I32 => format!("source.decode_i64({key:?}).and_then(|value| i32::try_from(value).ok())"),
        SemanticType::U64 => format!("source.decode_u64({key:?})"),
        SemanticType::U8 => format!("source.decode_u64({key:?}).and_then(|value| u8::try_from(value).ok())"),
        SemanticType::U16 => format!("source.decode_u64({key:?}).and_then(|value| u16::try_from(value).ok())"),
        SemanticType::U32 => format!("source.decode_u64({key:?}).and_then(|value| u32::try_from(value).ok())"),
        SemanticType::F64 => format!("source.decode_f64({key:?})"),
        SemanticType::F32 => format!("source.decode_f64({key:?}).map(|value| value as f32)"),
        SemanticType::Bool => format!("source.decode_bool({key:?})"),
        SemanticType::Str => format!("source.decode_str({key:?})"),
        SemanticType::Url => {
            format!("source.decode_str({key:?}).and_then(|value| cast_value::Url::parse(&value).ok())")
        }
        other => {
            let inner = match shape(other, enums) {
                ValueShape::Coerce(ty) => {
                    format!("<{ty} as cast_value::FromValue>::from_value(&value)")
                }
                ValueShape::Enum(name) => format!("cast_value::enum_from_value::<{name}>(&value)"),
                ValueShape::Composite(name) => {
                    format!("cast_value::bindable_from_value::<{name}>(&value)")
                }
                ValueShape::EnumVec(name) => {
                    format!("cast_value::enum_vec_from_value::<{name}>(&value)")
                }
                ValueShape::CompositeVec(name) => {
                    format!("cast_value::bindable_vec_from_value::<{name}>(&value)")
                }
                ValueShape::CompositeMap(name) => {
                    format!("cast_value::bindable_map_from_value::<{name}>(&value)")
                }
            };
            format!("source.decode_value({key:?}).and_then(|value| {inner})")
        }
    }
}

fn emit_archive_decode(ctx: &mut EmitContext<'_>, class: &ClassSpec, enums: &EnumRawMap) {
    let vis = visibility(class.access);
    ctx.writeln("/// Decode from a keyed archive.");
    ctx.writeln(&format!(
        "{vis}fn archive_decode(source: &impl ArchiveSource) -> Option<Self> {{"
    ));
    ctx.indent();
    if let Some(parent) = &class.parent {
        ctx.writeln(&format!(
            "let base = source.decode_value(\"super\").and_then(|value| cast_value::bindable_from_value::<{parent}>(&value))?;"
        ));
    }
    for field in &class.fields {
        let name = &field.name;
        if !field.in_archive() {
            ctx.writeln(&format!("let {name} = {};", member_init(field)));
            continue;
        }
        let base = archive_decode_expr(field, enums);
        if field.required() {
            if field.nullable {
                ctx.writeln(&format!("let {name} = Some({base}?);"));
            } else {
                ctx.writeln(&format!("let {name} = {base}?;"));
            }
        } else if let Some(default) = default_expr(field) {
            if field.nullable {
                ctx.writeln(&format!("let {name} = {base}.or_else(|| Some({default}));"));
            } else {
                ctx.writeln(&format!("let {name} = {base}.unwrap_or_else(|| {default});"));
            }
        } else if field.default_expression.is_some() && !field.nullable {
            ctx.writeln(&format!("let {name} = {base}.unwrap_or_default();"));
        } else {
            ctx.writeln(&format!("let {name} = {base};"));
        }
    }
    ctx.writeln(&format!("Some(Self {{ {} }})", struct_literal(class)));
    ctx.dedent();
    ctx.writeln("}");
}
