//! Keyed binary-archive interface.
//!
//! The archive codec itself is an external collaborator; generated
//! `archive_encode`/`archive_decode` routines only talk to these two
//! traits. [`MemoryArchive`] is the in-memory double used by tests.

use rustc_hash::FxHashMap;
use serde_json::{Number, Value};

/// Write side of a keyed archive.
pub trait ArchiveSink {
    fn encode_bool(&mut self, value: bool, key: &str);
    fn encode_i64(&mut self, value: i64, key: &str);
    fn encode_u64(&mut self, value: u64, key: &str);
    fn encode_f64(&mut self, value: f64, key: &str);
    fn encode_str(&mut self, value: &str, key: &str);

    /// Encode a structured value (composites, sequences, raw
    /// documents) under a key.
    fn encode_value(&mut self, value: Value, key: &str);
}

/// Read side of a keyed archive.
pub trait ArchiveSource {
    /// Presence check, used to gate decodes of required fields.
    fn contains(&self, key: &str) -> bool;

    fn decode_bool(&self, key: &str) -> Option<bool>;
    fn decode_i64(&self, key: &str) -> Option<i64>;
    fn decode_u64(&self, key: &str) -> Option<u64>;
    fn decode_f64(&self, key: &str) -> Option<f64>;
    fn decode_str(&self, key: &str) -> Option<String>;
    fn decode_value(&self, key: &str) -> Option<Value>;
}

/// Map-backed archive for tests and round-trip checks.
#[derive(Debug, Default)]
pub struct MemoryArchive {
    entries: FxHashMap<String, Value>,
}

impl MemoryArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ArchiveSink for MemoryArchive {
    fn encode_bool(&mut self, value: bool, key: &str) {
        self.entries.insert(key.to_owned(), Value::Bool(value));
    }

    fn encode_i64(&mut self, value: i64, key: &str) {
        self.entries.insert(key.to_owned(), Value::Number(Number::from(value)));
    }

    fn encode_u64(&mut self, value: u64, key: &str) {
        self.entries.insert(key.to_owned(), Value::Number(Number::from(value)));
    }

    fn encode_f64(&mut self, value: f64, key: &str) {
        if let Some(n) = Number::from_f64(value) {
            self.entries.insert(key.to_owned(), Value::Number(n));
        }
    }

    fn encode_str(&mut self, value: &str, key: &str) {
        self.entries.insert(key.to_owned(), Value::String(value.to_owned()));
    }

    fn encode_value(&mut self, value: Value, key: &str) {
        self.entries.insert(key.to_owned(), value);
    }
}

impl ArchiveSource for MemoryArchive {
    fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn decode_bool(&self, key: &str) -> Option<bool> {
        self.entries.get(key)?.as_bool()
    }

    fn decode_i64(&self, key: &str) -> Option<i64> {
        self.entries.get(key)?.as_i64()
    }

    fn decode_u64(&self, key: &str) -> Option<u64> {
        self.entries.get(key)?.as_u64()
    }

    fn decode_f64(&self, key: &str) -> Option<f64> {
        self.entries.get(key)?.as_f64()
    }

    fn decode_str(&self, key: &str) -> Option<String> {
        self.entries.get(key)?.as_str().map(str::to_owned)
    }

    fn decode_value(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn round_trips_scalars() {
        let mut archive = MemoryArchive::new();
        archive.encode_bool(true, "b");
        archive.encode_i64(-4, "i");
        archive.encode_u64(4, "u");
        archive.encode_f64(2.5, "f");
        archive.encode_str("s", "s");

        assert_eq!(archive.decode_bool("b"), Some(true));
        assert_eq!(archive.decode_i64("i"), Some(-4));
        assert_eq!(archive.decode_u64("u"), Some(4));
        assert_eq!(archive.decode_f64("f"), Some(2.5));
        assert_eq!(archive.decode_str("s"), Some("s".to_owned()));
    }

    #[test]
    fn contains_gates_missing_keys() {
        let mut archive = MemoryArchive::new();
        assert!(!archive.contains("x"));
        archive.encode_value(json!({"a": 1}), "x");
        assert!(archive.contains("x"));
        assert_eq!(archive.decode_value("x"), Some(json!({"a": 1})));
        assert_eq!(archive.decode_value("y"), None);
    }

    #[test]
    fn mismatched_type_decodes_as_absent() {
        let mut archive = MemoryArchive::new();
        archive.encode_str("hi", "k");
        assert_eq!(archive.decode_i64("k"), None);
    }
}
