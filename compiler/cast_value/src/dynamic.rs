//! By-name construction registry.
//!
//! Classes declared with the dynamic directive get a generated
//! registration routine; an application collects those into one
//! registry and can then construct any registered type from a document
//! knowing only its name. The constructed value comes back type-erased.

use std::any::Any;

use rustc_hash::FxHashMap;
use serde_json::Value;

/// A registered constructor: document in, erased instance out.
pub type DynamicFactory = fn(&Value) -> Option<Box<dyn Any>>;

/// Name-keyed constructor table.
#[derive(Default)]
pub struct DynamicRegistry {
    factories: FxHashMap<String, DynamicFactory>,
}

impl DynamicRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constructor under a type name. Re-registration
    /// replaces the earlier entry.
    pub fn register(&mut self, name: impl Into<String>, factory: DynamicFactory) {
        self.factories.insert(name.into(), factory);
    }

    /// Construct a registered type by name. Absent when the name is
    /// unknown or the underlying construction fails.
    pub fn construct(&self, name: &str, document: &Value) -> Option<Box<dyn Any>> {
        self.factories.get(name).and_then(|factory| factory(document))
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::bindable::Bindable;
    use crate::document::Document;

    use super::*;

    #[derive(Debug, PartialEq)]
    struct Marker {
        id: i64,
    }

    impl Bindable for Marker {
        fn from_document(document: &Value) -> Option<Self> {
            let id: i64 = document.value_path("id")?;
            Some(Self { id })
        }

        fn represent(&self) -> Value {
            json!({"id": self.id})
        }
    }

    #[test]
    fn constructs_registered_type_by_name() {
        let mut registry = DynamicRegistry::new();
        registry.register("Marker", |document| {
            Marker::from_document(document).map(|value| Box::new(value) as Box<dyn Any>)
        });

        assert!(registry.is_registered("Marker"));
        let built = registry.construct("Marker", &json!({"id": 9}));
        let marker = built.and_then(|b| b.downcast::<Marker>().ok());
        assert_eq!(marker.as_deref(), Some(&Marker { id: 9 }));
    }

    #[test]
    fn unknown_name_and_failed_construction_are_absent() {
        let mut registry = DynamicRegistry::new();
        registry.register("Marker", |document| {
            Marker::from_document(document).map(|value| Box::new(value) as Box<dyn Any>)
        });

        assert!(registry.construct("Other", &json!({"id": 9})).is_none());
        assert!(registry.construct("Marker", &json!({"no": 1})).is_none());
    }
}
