//! Command-line argument parsing.
//!
//! `cast [switches] <input> <output>`. Switches may appear anywhere;
//! anything that is not a recognized switch counts as a positional in
//! arrival order, and exactly two positionals are required.

use std::path::PathBuf;

use cast_scan::ScanOptions;

use crate::CliError;

/// Parsed invocation.
#[derive(Clone, Debug)]
pub struct CliArgs {
    pub scan: ScanOptions,
    /// Treat an empty resolved string as a miss (`-n`).
    pub null_empty_string: bool,
    /// Suppress the generated `use` block (`--no-imports`).
    pub suppress_imports: bool,
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Parse an argument list (program name already stripped).
pub fn parse(args: &[String]) -> Result<CliArgs, CliError> {
    let mut scan = ScanOptions::default();
    let mut null_empty_string = false;
    let mut suppress_imports = false;
    let mut positionals: Vec<&str> = Vec::new();

    for arg in args {
        match arg.as_str() {
            "-c" | "--capitalized" => scan.capitalize_keys = true,
            "-n" | "--null-empty" => null_empty_string = true,
            "-i" | "--ignore-case" => scan.lowercase_keys = true,
            "-u" | "--updater" => scan.emit_updater = true,
            "--log" => scan.log_all = true,
            "--no-imports" => suppress_imports = true,
            other => positionals.push(other),
        }
    }

    let [input, output] = positionals.as_slice() else {
        return Err(CliError::Positionals {
            count: positionals.len(),
        });
    };

    Ok(CliArgs {
        scan,
        null_empty_string,
        suppress_imports,
        input: PathBuf::from(input),
        output: PathBuf::from(output),
    })
}

pub const USAGE: &str = "\
Usage: cast [switches] <input> <output>

Switches:
  -c, --capitalized   uppercase-first-letter key convention
  -n, --null-empty    treat an empty string value as missing
  -i, --ignore-case   case-insensitive keys (overrides -c)
  -u, --updater       emit update routines
      --log           log resolution misses in all classes
      --no-imports    suppress the generated use block";
