//! Declaration scanning for the binding generator.
//!
//! This crate turns annotated declaration source into [`cast_ir`]
//! model records. It is deliberately not a full parser: recognition is
//! line oriented, driven by an exact brace-depth tracker that is aware
//! of string and comment literals, so arbitrary method bodies and
//! unrelated code pass through without being modeled.
//!
//! The entry point is [`Scanner`], a streaming iterator-style type
//! whose [`next_class`](Scanner::next_class) yields each completed
//! class in source order.

mod builder;
mod depth;
mod error;
mod patterns;
mod scanner;

pub use error::ScanError;
pub use scanner::{ScanOptions, Scanner};
