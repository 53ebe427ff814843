//! Cast CLI pipeline.
//!
//! `run` reads the declaration source, streams classes out of the
//! scanner, and emits generated Rust for each class with exactly the
//! enum registrations visible at the moment the class closed. The
//! first structural defect aborts the run and no output file is
//! written.

use std::fs;

use cast_emit::{emit_banner, emit_class, emit_imports, EmitContext, EmitOptions};
use cast_scan::{ScanError, ScanOptions, Scanner};
use thiserror::Error;
use tracing::{debug, info};

pub mod args;

use args::CliArgs;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("expected exactly two positional arguments (input, output), got {count}")]
    Positionals { count: usize },

    #[error("failed to read {path}: {source}")]
    ReadInput {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    WriteOutput {
        path: String,
        source: std::io::Error,
    },

    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// Scan a declaration source and generate the full output text.
pub fn generate(
    source: &str,
    scan: ScanOptions,
    emit: &EmitOptions,
) -> Result<String, ScanError> {
    let mut ctx = EmitContext::new(emit);
    emit_banner(&mut ctx);
    emit_imports(&mut ctx);

    let mut scanner = Scanner::new(source, scan);
    let mut classes = 0usize;
    while let Some(class) = scanner.next_class()? {
        emit_class(&mut ctx, &class, scanner.enums());
        classes += 1;
    }
    debug!(classes, "scan complete");
    Ok(ctx.take_output())
}

/// Run the full pipeline: read, scan, emit, write.
pub fn run(args: &CliArgs) -> Result<(), CliError> {
    let input = args.input.display().to_string();
    let source = fs::read_to_string(&args.input).map_err(|source| CliError::ReadInput {
        path: input.clone(),
        source,
    })?;

    let source_name = args
        .input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.clone());
    let emit = EmitOptions {
        null_empty_string: args.null_empty_string,
        ignore_case: args.scan.lowercase_keys,
        suppress_imports: args.suppress_imports,
        source_name,
    };

    let output = generate(&source, args.scan, &emit)?;
    fs::write(&args.output, output).map_err(|source| CliError::WriteOutput {
        path: args.output.display().to_string(),
        source,
    })?;
    info!(input = %input, output = %args.output.display(), "generated");
    Ok(())
}
