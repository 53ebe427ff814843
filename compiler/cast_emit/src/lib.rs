//! Rust source emission for scanned class declarations.
//!
//! The emitter consumes [`cast_ir`] class specs and produces the
//! generated side of the toolchain: for each declared class, the
//! struct definition plus its marshaling routines, all targeting the
//! `cast_value` runtime crate.
//!
//! Emission is streamed class by class so the caller can hand each
//! class over the moment the scanner closes it, with exactly the enum
//! registrations visible at that point.

mod class;
mod context;
mod field;
mod types;

pub use class::{emit_banner, emit_class, emit_imports};
pub use context::{EmitContext, EmitOptions};
