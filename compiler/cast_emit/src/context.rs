//! Emission context and state.
//!
//! `EmitContext` holds the output buffer and indentation state shared
//! by every emit routine.

/// Emitter configuration derived from the command line.
#[derive(Clone, Debug, Default)]
pub struct EmitOptions {
    /// Treat an empty resolved string as a miss (`-n`).
    pub null_empty_string: bool,
    /// Case-insensitive keys: generated lookups run against a
    /// lowercased copy of the document (`-i`).
    pub ignore_case: bool,
    /// Suppress the generated `use` block (`--no-imports`).
    pub suppress_imports: bool,
    /// Input file name, quoted in the banner.
    pub source_name: String,
}

/// Emission context.
///
/// Holds the output buffer and indentation while generating Rust
/// source from scanned class specs.
pub struct EmitContext<'a> {
    /// Emitter configuration for this run.
    pub options: &'a EmitOptions,
    /// Current indentation level.
    indent: usize,
    /// Generated code output.
    output: String,
}

impl<'a> EmitContext<'a> {
    /// Create a new emission context.
    pub fn new(options: &'a EmitOptions) -> Self {
        Self {
            options,
            indent: 0,
            output: String::with_capacity(4096),
        }
    }

    /// Increase indentation level.
    pub fn indent(&mut self) {
        self.indent += 1;
    }

    /// Decrease indentation level.
    pub fn dedent(&mut self) {
        debug_assert!(self.indent > 0, "dedent called with zero indent");
        self.indent = self.indent.saturating_sub(1);
    }

    /// Write a line to output (with indentation and newline).
    pub fn writeln(&mut self, s: &str) {
        for _ in 0..self.indent {
            self.output.push_str("    ");
        }
        self.output.push_str(s);
        self.output.push('\n');
    }

    /// Write a blank line.
    pub fn newline(&mut self) {
        self.output.push('\n');
    }

    /// Take the generated output.
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }
}
