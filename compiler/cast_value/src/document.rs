//! Nested-path resolution over the untyped document tree.
//!
//! Resolution walks a [`PathExpression`]'s alternatives left to right
//! and returns the first raw value that fully resolves. Within an
//! alternative, a plain segment is an object lookup and an indexed
//! segment is an object lookup followed by a bounds-checked element
//! access; any miss fails the whole alternative.

use serde_json::{Map, Value};

use crate::coerce::FromValue;
use crate::path::{KeyPath, PathExpression};

/// The document interface generated code resolves against.
pub trait Document {
    /// Direct single-key lookup, no path interpretation.
    fn any_for_key(&self, key: &str) -> Option<&Value>;

    /// Resolve a parsed path expression: first alternative to fully
    /// resolve wins, otherwise absent.
    fn any_at(&self, path: &PathExpression) -> Option<&Value>;

    /// Parse-and-resolve convenience for string key paths.
    fn any_path(&self, path: &str) -> Option<&Value> {
        self.any_at(&PathExpression::parse(path))
    }

    /// Resolve and coerce in one step.
    fn value_at<T: FromValue>(&self, path: &PathExpression) -> Option<T> {
        self.any_at(path).and_then(T::from_value)
    }

    /// Parse, resolve, and coerce string key paths.
    fn value_path<T: FromValue>(&self, path: &str) -> Option<T> {
        self.any_path(path).and_then(T::from_value)
    }

    /// A copy of this document with every object key lowercased,
    /// recursively. Pairs with the emitter's ignore-case convention.
    fn lowercased_keys(&self) -> Value;
}

impl Document for Value {
    fn any_for_key(&self, key: &str) -> Option<&Value> {
        self.as_object()?.get(key)
    }

    fn any_at(&self, path: &PathExpression) -> Option<&Value> {
        path.alternatives.iter().find_map(|alt| resolve_alternative(self, alt))
    }

    fn lowercased_keys(&self) -> Value {
        match self {
            Value::Object(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.to_lowercase(), v.lowercased_keys()))
                    .collect(),
            ),
            Value::Array(items) => Value::Array(items.iter().map(Document::lowercased_keys).collect()),
            other => other.clone(),
        }
    }
}

/// Walk one alternative to completion; any segment miss fails it.
fn resolve_alternative<'a>(document: &'a Value, alt: &KeyPath) -> Option<&'a Value> {
    let mut current = document;
    for segment in &alt.segments {
        let found = current.any_for_key(&segment.key)?;
        current = match segment.index {
            Some(index) => found.as_array()?.get(index)?,
            None => found,
        };
    }
    Some(current)
}

/// Place `value` at the path's final key, materializing intermediate
/// objects along the way. An existing non-object at an intermediate
/// segment is replaced by an object.
///
/// Array indices on the write path are not interpreted; the segment's
/// key alone is used.
pub fn insert_at(root: &mut Value, path: &KeyPath, value: Value) {
    let Some((last, nested)) = path.segments.split_last() else {
        return;
    };
    if !root.is_object() {
        *root = Value::Object(Map::new());
    }
    let mut current = root;
    for segment in nested {
        let Value::Object(object) = current else { return };
        let entry = object
            .entry(segment.key.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        current = entry;
    }
    if let Value::Object(object) = current {
        object.insert(last.key.clone(), value);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn resolves_plain_key() {
        let doc = json!({"name": "n"});
        assert_eq!(doc.any_path("name"), Some(&json!("n")));
        assert_eq!(doc.any_path("missing"), None);
    }

    #[test]
    fn resolves_nested_path() {
        let doc = json!({"a": {"b": {"c": 7}}});
        assert_eq!(doc.any_path("a/b/c"), Some(&json!(7)));
        assert_eq!(doc.any_path("a/b/missing"), None);
        assert_eq!(doc.any_path("a/c/b"), None);
    }

    #[test]
    fn indexed_segment_in_bounds() {
        let doc = json!({"items": ["a", "b", "c"]});
        assert_eq!(doc.any_path("items[2]"), Some(&json!("c")));
    }

    #[test]
    fn indexed_segment_out_of_bounds_is_absent() {
        let doc = json!({"items": ["a", "b", "c"]});
        assert_eq!(doc.any_path("items[5]"), None);
    }

    #[test]
    fn indexed_segment_on_non_array_is_absent() {
        let doc = json!({"items": {"0": "a"}});
        assert_eq!(doc.any_path("items[0]"), None);
    }

    #[test]
    fn first_alternative_wins() {
        let doc = json!({"a": 1, "b": 2});
        assert_eq!(doc.any_path("a ?? b"), Some(&json!(1)));
        assert_eq!(doc.any_path("b ?? a"), Some(&json!(2)));
    }

    #[test]
    fn falls_through_failed_alternatives() {
        let doc = json!({"nested": {"x": 3}});
        assert_eq!(doc.any_path("x ?? nested/missing ?? nested/x"), Some(&json!(3)));
        assert_eq!(doc.any_path("x ?? y"), None);
    }

    #[test]
    fn scalar_cursor_fails_further_lookups() {
        let doc = json!({"a": 5});
        assert_eq!(doc.any_path("a/b"), None);
    }

    #[test]
    fn typed_resolution_applies_coercion() {
        let doc = json!({"n": "42"});
        assert_eq!(doc.value_path::<i64>("n"), Some(42));
        assert_eq!(doc.value_path::<bool>("n"), Some(false));
    }

    #[test]
    fn lowercased_keys_recurses() {
        let doc = json!({"Name": "n", "Inner": {"HomeUrl": 1}, "List": [{"X": 2}]});
        assert_eq!(
            doc.lowercased_keys(),
            json!({"name": "n", "inner": {"homeurl": 1}, "list": [{"x": 2}]})
        );
    }

    #[test]
    fn insert_at_plain_key() {
        let mut doc = json!({});
        insert_at(&mut doc, &KeyPath::parse("name"), json!("n"));
        assert_eq!(doc, json!({"name": "n"}));
    }

    #[test]
    fn insert_at_materializes_intermediates() {
        let mut doc = json!({});
        insert_at(&mut doc, &KeyPath::parse("a/b/c"), json!(1));
        assert_eq!(doc, json!({"a": {"b": {"c": 1}}}));
    }

    #[test]
    fn insert_at_merges_into_existing_objects() {
        let mut doc = json!({"a": {"x": 0}});
        insert_at(&mut doc, &KeyPath::parse("a/b"), json!(1));
        assert_eq!(doc, json!({"a": {"x": 0, "b": 1}}));
    }

    #[test]
    fn insert_at_replaces_scalar_intermediate() {
        let mut doc = json!({"a": 5});
        insert_at(&mut doc, &KeyPath::parse("a/b"), json!(1));
        assert_eq!(doc, json!({"a": {"b": 1}}));
    }
}
