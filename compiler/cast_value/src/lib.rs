//! Runtime library for Cast-generated marshaling code.
//!
//! Generated routines lean on three pieces that live here:
//!
//! - [`PathExpression`]: a parsed key reference — an ordered fallback
//!   chain of alternative paths, each a list of plain or array-indexed
//!   segments (`"images/cover[0] ?? coverUrl"`).
//! - The [`Document`] trait over [`serde_json::Value`]: nested-path
//!   resolution with first-alternative-wins semantics, plus typed
//!   lookups built on the coercion rules.
//! - The coercion rules themselves ([`FromValue`]/[`ToValue`]):
//!   string-to-number parsing, the truthy-string set for booleans, URL
//!   parsing, element-dropping arrays, and raw-value enum bridging
//!   through [`EnumRaw`].
//!
//! Turning raw bytes into the untyped tree is not this crate's job;
//! `serde_json` does that, and everything here walks the resulting
//! [`Value`](serde_json::Value).

mod archive;
mod bindable;
mod coerce;
mod document;
mod dynamic;
mod path;

pub use archive::{ArchiveSink, ArchiveSource, MemoryArchive};
pub use bindable::{
    bindable_from_value, bindable_map_from_value, bindable_map_to_value, bindable_to_value,
    bindable_vec_from_value, bindable_vec_to_value, log_resolution_miss, Bindable, BindableUpdate,
};
pub use coerce::{
    enum_from_value, enum_to_value, enum_vec_from_value, enum_vec_to_value, EnumRaw, FromValue,
    ToValue,
};
pub use document::{insert_at, Document};
pub use dynamic::{DynamicFactory, DynamicRegistry};
pub use path::{KeyPath, PathExpression, Segment};

// Generated URL fields name this type without a direct `url` dependency.
pub use url::Url;
