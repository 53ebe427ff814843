//! The single-pass declaration scanner.
//!
//! The scanner walks source lines once, tracking nesting depth through
//! [`DepthTracker`]. Recognition is gated on depth: type and enum
//! headers open at the top level, field and directive lines are read
//! at depth 1 inside an open class, and everything else passes by
//! untouched. A class is handed to the caller the moment its closing
//! brace returns the depth to 0, so enum raw-type registration is
//! visible to exactly those classes that close after the enum header
//! was seen.

use cast_ir::{ClassDirectives, ClassSpec, EnumRawMap, ParentStrategy, SemanticType};
use tracing::{debug, trace};

use crate::builder::{build_class, build_field};
use crate::depth::DepthTracker;
use crate::patterns::{body_directive, class_header, enum_header, field_line, BodyDirective, PatternError};
use crate::ScanError;

/// Scanner configuration derived from the command line.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScanOptions {
    /// Uppercase-first-letter key convention (`-c`).
    pub capitalize_keys: bool,
    /// Case-insensitive keys: lowercase every path segment (`-i`).
    pub lowercase_keys: bool,
    /// Emit updater routines for every class (`-u`).
    pub emit_updater: bool,
    /// Log resolution misses in every class (`--log`).
    pub log_all: bool,
}

/// Streaming scanner over one declaration source.
///
/// [`next_class`](Self::next_class) returns classes in source order as
/// their closing braces are reached; [`enums`](Self::enums) reflects
/// every enum header seen so far, which is exactly the set a just
/// closed class may reference.
pub struct Scanner<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    tracker: DepthTracker,
    current: Option<ClassSpec>,
    enums: EnumRawMap,
    options: ScanOptions,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str, options: ScanOptions) -> Self {
        Self {
            lines: source.lines().enumerate(),
            tracker: DepthTracker::new(),
            current: None,
            enums: EnumRawMap::new(),
            options,
        }
    }

    /// Raw-value enums registered so far.
    pub fn enums(&self) -> &EnumRawMap {
        &self.enums
    }

    /// Scan forward to the next completed class declaration.
    ///
    /// `Ok(None)` means the source is exhausted. Structural defects
    /// (malformed enum or class header, an unterminated declaration)
    /// abort the scan.
    pub fn next_class(&mut self) -> Result<Option<ClassSpec>, ScanError> {
        while let Some((index, line)) = self.lines.next() {
            let line_no = index + 1;
            let in_comment = self.tracker.in_comment();
            let prior = self.tracker.depth();
            let depth = self.tracker.feed(line);
            if in_comment {
                continue;
            }

            // Enum headers register immediately, independent of class
            // boundaries, so later fields anywhere can resolve them.
            if prior <= 1 {
                if let Some(header) = enum_header(line).map_err(|e| fatal(e, line_no, line))? {
                    debug!(name = %header.name, raw = %header.raw_type, "registered enum");
                    self.enums
                        .register(header.name, SemanticType::parse(&header.raw_type));
                    continue;
                }
            }

            if self.current.is_some() {
                if depth == 0 {
                    if let Some(class) = self.current.take() {
                        debug!(name = %class.name, fields = class.fields.len(), "closed class");
                        return Ok(Some(class));
                    }
                } else if prior == 1 {
                    let directive = body_directive(line).map_err(|e| fatal(e, line_no, line))?;
                    if let Some(class) = self.current.as_mut() {
                        if let Some(directive) = directive {
                            apply_directive(class, directive);
                        } else if let Some(capture) = field_line(line) {
                            trace!(class = %class.name, field = %capture.name, "captured field");
                            class.fields.push(build_field(capture, &self.options));
                        }
                    }
                }
            } else if prior == 0 {
                if let Some(header) = class_header(line).map_err(|e| fatal(e, line_no, line))? {
                    debug!(name = %header.name, "opened class");
                    self.current = Some(build_class(header, &self.options));
                }
            }
        }

        match self.current.take() {
            Some(class) => Err(ScanError::UnterminatedClass { name: class.name }),
            None => Ok(None),
        }
    }

}

fn fatal(error: PatternError, line: usize, text: &str) -> ScanError {
    match error {
        PatternError::EnumMissingRawType => ScanError::EnumMissingRawType {
            line,
            text: text.trim().to_owned(),
        },
        PatternError::ClassMissingName => ScanError::MalformedClassHeader {
            line,
            text: text.trim().to_owned(),
        },
        PatternError::SuperMissingTag => ScanError::SuperMissingTag { line },
    }
}

fn apply_directive(class: &mut ClassSpec, directive: BodyDirective) {
    match directive {
        BodyDirective::Archive => class.directives |= ClassDirectives::ARCHIVE,
        BodyDirective::DefaultConstructor => {
            class.directives |= ClassDirectives::DEFAULT_CONSTRUCTOR;
        }
        BodyDirective::Hook => class.directives |= ClassDirectives::HOOK,
        BodyDirective::Dynamic => class.directives |= ClassDirectives::DYNAMIC,
        BodyDirective::Log => class.directives |= ClassDirectives::LOG,
        BodyDirective::SuperTag(tag) => {
            class.parent_strategy = ParentStrategy::NestedUnderTag(tag);
        }
    }
}
