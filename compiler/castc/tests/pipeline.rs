//! End-to-end pipeline checks: DSL source in, generated Rust text out.

use cast_emit::EmitOptions;
use cast_scan::{ScanError, ScanOptions};
use castc::generate;
use indoc::indoc;
use pretty_assertions::assert_eq;

fn run(source: &str, scan: ScanOptions, emit: &EmitOptions) -> String {
    match generate(source, scan, emit) {
        Ok(output) => output,
        Err(error) => panic!("unexpected pipeline failure: {error}"),
    }
}

#[test]
fn generates_banner_imports_and_class() {
    let source = indoc! {r"
        struct Point: Bindable {
            var x: Int
            var y: Int = 0
        }
    "};
    let emit = EmitOptions {
        source_name: "point.swift".to_owned(),
        ..EmitOptions::default()
    };
    let output = run(source, ScanOptions::default(), &emit);

    assert!(output.starts_with("// Generated by cast from point.swift. Do not edit"));
    assert_eq!(output.matches("use serde_json::Value;").count(), 1);
    assert!(output.contains("pub(crate) struct Point {"));
    assert!(output.contains(r#"let x = document.value_path::<i64>("x")?;"#));
    assert!(output.contains(r#"let y = document.value_path::<i64>("y").unwrap_or_else(|| 0);"#));
}

#[test]
fn no_imports_switch_suppresses_the_use_block() {
    let source = "struct A: Bindable {\n    var x: Int\n}\n";
    let emit = EmitOptions {
        suppress_imports: true,
        ..EmitOptions::default()
    };
    let output = run(source, ScanOptions::default(), &emit);
    assert!(!output.contains("use serde_json"));
    assert!(!output.contains("use cast_value"));
    assert!(output.contains("struct A {"));
}

#[test]
fn enum_declared_before_class_resolves_as_enum() {
    let source = indoc! {r"
        enum Status: Int {
            case open
            case closed
        }
        class Ticket: Bindable {
            var status: Status
        }
    "};
    let output = run(source, ScanOptions::default(), &EmitOptions::default());
    assert!(output.contains("cast_value::enum_from_value::<Status>"));
    assert!(!output.contains("bindable_from_value::<Status>"));
}

#[test]
fn enum_declared_after_class_is_treated_as_composite() {
    let source = indoc! {r"
        class Ticket: Bindable {
            var status: Status
        }
        enum Status: Int {
            case open
        }
    "};
    let output = run(source, ScanOptions::default(), &EmitOptions::default());
    assert!(output.contains("cast_value::bindable_from_value::<Status>"));
}

#[test]
fn directives_flow_through_to_emission() {
    let source = indoc! {r#"
        public class Session: Bindable {
            //! archive
            //! hook
            var token: String
            var ttl: Int? //! "expires/ttl ?? ttl"
        }
    "#};
    let output = run(source, ScanOptions::default(), &EmitOptions::default());
    assert!(output.contains("pub struct Session {"));
    assert!(output.contains("pub fn archive_encode(&self, sink: &mut impl ArchiveSink) {"));
    assert!(output.contains("if !value.awake_with(document) {"));
    assert!(output.contains(r#"document.value_path::<i64>("expires/ttl ?? ttl")"#));
}

#[test]
fn capitalized_switch_transforms_keys() {
    let source = "struct A: Bindable {\n    var homeUrl: String\n}\n";
    let scan = ScanOptions {
        capitalize_keys: true,
        ..ScanOptions::default()
    };
    let output = run(source, scan, &EmitOptions::default());
    assert!(output.contains(r#"document.value_path::<String>("HomeUrl")"#));
}

#[test]
fn updater_switch_adds_update_impls() {
    let source = "struct A: Bindable {\n    var x: Int\n    let y: Int\n}\n";
    let scan = ScanOptions {
        emit_updater: true,
        ..ScanOptions::default()
    };
    let output = run(source, scan, &EmitOptions::default());
    assert!(output.contains("impl BindableUpdate for A {"));
    assert!(output.contains("self.x = value;"));
    assert!(!output.contains("self.y = value;"));
}

#[test]
fn scan_errors_abort_with_no_output() {
    let source = "enum Broken {\n}\n";
    let result = generate(source, ScanOptions::default(), &EmitOptions::default());
    assert!(matches!(result, Err(ScanError::EnumMissingRawType { line: 1, .. })));
}

#[test]
fn multiple_classes_emit_in_source_order() {
    let source = indoc! {r"
        struct First: Bindable {
            var a: Int
        }
        struct Second: Bindable {
            var b: Int
        }
    "};
    let output = run(source, ScanOptions::default(), &EmitOptions::default());
    let first = output.find("struct First");
    let second = output.find("struct Second");
    assert!(first.is_some() && second.is_some());
    assert!(first < second);
}
