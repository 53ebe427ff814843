//! The trait surface generated marshaling code implements.

use serde_json::Value;

/// A type constructible from an untyped document and representable as
/// one. Generated `from_document`/`represent` routines implement this.
pub trait Bindable: Sized {
    /// Construct from a document tree. Absent when a required field
    /// fails to resolve, a generated parent construction fails, or the
    /// post-construction hook rejects.
    fn from_document(document: &Value) -> Option<Self>;

    /// The document representation. Fields whose encode yields absent
    /// are omitted, never emitted as null.
    fn represent(&self) -> Value;

    /// Post-construction hook, invoked when the declaration requests
    /// it. Returning `false` fails the whole construction.
    fn awake_with(&mut self, _document: &Value) -> bool {
        true
    }

    /// Parse a JSON string and construct from the resulting tree.
    fn from_json_str(json: &str) -> Option<Self> {
        let document: Value = serde_json::from_str(json).ok()?;
        Self::from_document(&document)
    }

    /// Parse raw JSON bytes and construct from the resulting tree.
    fn from_json_bytes(json: &[u8]) -> Option<Self> {
        let document: Value = serde_json::from_slice(json).ok()?;
        Self::from_document(&document)
    }
}

/// In-place re-binding from a document. Unresolved fields keep their
/// current value; this path never fails.
pub trait BindableUpdate {
    fn update(&mut self, document: &Value);
}

/// Decode a nested composite: the raw value must be an associative
/// container, constructed through the type's own `from_document`.
pub fn bindable_from_value<T: Bindable>(value: &Value) -> Option<T> {
    value.is_object().then(|| T::from_document(value)).flatten()
}

/// Encode a nested composite as its document representation.
pub fn bindable_to_value<T: Bindable>(value: &T) -> Option<Value> {
    Some(value.represent())
}

/// Decode a sequence of composites, dropping elements that fail.
pub fn bindable_vec_from_value<T: Bindable>(value: &Value) -> Option<Vec<T>> {
    let items = value.as_array()?;
    Some(items.iter().filter_map(T::from_document).collect())
}

/// Encode a sequence of composites.
pub fn bindable_vec_to_value<T: Bindable>(values: &[T]) -> Option<Value> {
    Some(Value::Array(values.iter().map(Bindable::represent).collect()))
}

/// Decode a string-keyed map of composites, dropping entries that fail.
pub fn bindable_map_from_value<T: Bindable>(
    value: &Value,
) -> Option<std::collections::HashMap<String, T>> {
    let entries = value.as_object()?;
    Some(
        entries
            .iter()
            .filter_map(|(k, v)| bindable_from_value(v).map(|v| (k.clone(), v)))
            .collect(),
    )
}

/// Encode a string-keyed map of composites.
pub fn bindable_map_to_value<T: Bindable>(
    values: &std::collections::HashMap<String, T>,
) -> Option<Value> {
    Some(Value::Object(
        values.iter().map(|(k, v)| (k.clone(), v.represent())).collect(),
    ))
}

/// Resolution-miss hook for generated constructors built with logging
/// on. Emits at debug so production documents with legitimately sparse
/// shapes stay quiet by default.
pub fn log_resolution_miss(type_name: &str, field: &str, path: &str) {
    tracing::debug!(type_name, field, path, "required field failed to resolve");
}
