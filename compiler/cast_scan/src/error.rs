//! Structural scan failures.
//!
//! These are fatal: the tool is a build-time batch transform with no
//! partial-success mode, so the first structural defect aborts the run
//! and no output is written.

use thiserror::Error;

#[derive(Debug, Error, Eq, PartialEq)]
pub enum ScanError {
    #[error("line {line}: enum declaration missing its raw type: `{text}`")]
    EnumMissingRawType { line: usize, text: String },

    #[error("line {line}: malformed class header: `{text}`")]
    MalformedClassHeader { line: usize, text: String },

    #[error("line {line}: `super` directive requires a quoted tag: //! super \"tag\"")]
    SuperMissingTag { line: usize },

    #[error("declaration of `{name}` is never closed before end of input")]
    UnterminatedClass { name: String },
}
