//! Line-pattern recognition.
//!
//! Declarations and directives are recognized by pattern, not by a
//! full grammar: each function inspects a single trimmed line and
//! either produces a capture, declines (`None` — the line is simply
//! not that construct), or reports a structural defect in a construct
//! that was unambiguously started (`enum` without a raw type, `super`
//! without a tag). Structural defects are fatal to the whole run.

use cast_ir::{AccessLevel, ClassKind};

/// Structural defects recognized at the pattern level. The scanner
/// attaches line numbers and converts these into [`ScanError`]s.
///
/// [`ScanError`]: crate::ScanError
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PatternError {
    EnumMissingRawType,
    SuperMissingTag,
    ClassMissingName,
}

/// Captures from a type-declaration header line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClassHeader {
    pub kind: ClassKind,
    pub access: AccessLevel,
    pub name: String,
    pub inheritance: Vec<String>,
}

/// Captures from an enum header line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EnumHeader {
    pub name: String,
    pub raw_type: String,
}

/// A dedicated directive line inside a class body.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BodyDirective {
    Archive,
    DefaultConstructor,
    Hook,
    Dynamic,
    Log,
    SuperTag(String),
}

/// Captures from a stored-field line, inline directives included.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldCapture {
    pub mutable: bool,
    pub name: String,
    pub type_text: String,
    pub default: Option<String>,
    /// `//! ignore`
    pub skip: bool,
    /// `//! "path"` / `//! ="path"` — the bool is the as-is marker.
    pub key_override: Option<(String, bool)>,
    /// `//! custom name`
    pub custom_resolver: Option<String>,
    /// `//! nojson`
    pub archive_only: bool,
}

/// `[access] [final] (class|struct) Name[: inheritance-list] {`
pub fn class_header(line: &str) -> Result<Option<ClassHeader>, PatternError> {
    let trimmed = strip_line_comment(line).trim();
    let Some(body) = trimmed.strip_suffix('{') else {
        return Ok(None);
    };
    let (access, rest) = leading_modifiers(body.trim());
    let (kind_word, tail) = split_word(rest);
    let kind = match kind_word {
        "class" => ClassKind::Reference,
        "struct" => ClassKind::Value,
        _ => return Ok(None),
    };
    let (name, inherit) = match tail.split_once(':') {
        Some((name, list)) => (name.trim(), Some(list)),
        None => (tail.trim(), None),
    };
    if name.is_empty() || name.contains(char::is_whitespace) {
        return Err(PatternError::ClassMissingName);
    }
    let inheritance = inherit
        .map(|list| {
            list.split(',')
                .map(|entry| entry.trim().to_owned())
                .filter(|entry| !entry.is_empty())
                .collect()
        })
        .unwrap_or_default();
    Ok(Some(ClassHeader {
        kind,
        access,
        name: name.to_owned(),
        inheritance,
    }))
}

/// `[access] enum Name: RawType {` — a raw type is structurally
/// required, because raw-value coercion for the enum cannot be emitted
/// without it.
pub fn enum_header(line: &str) -> Result<Option<EnumHeader>, PatternError> {
    let (_, rest) = leading_modifiers(line.trim());
    let (word, tail) = split_word(rest);
    if word != "enum" {
        return Ok(None);
    }
    let Some((name, raw_list)) = tail.split_once(':') else {
        return Err(PatternError::EnumMissingRawType);
    };
    let name = name.trim();
    let raw_type = raw_list
        .split(|c: char| c == ',' || c == '{' || c.is_whitespace())
        .find(|part| !part.is_empty())
        .unwrap_or("");
    if name.is_empty() || raw_type.is_empty() {
        return Err(PatternError::EnumMissingRawType);
    }
    Ok(Some(EnumHeader {
        name: name.to_owned(),
        raw_type: raw_type.to_owned(),
    }))
}

/// A dedicated `//! ...` directive line (the whole line is the
/// directive). Unrecognized directive words decline rather than fail;
/// only `super` without its quoted tag is structural.
pub fn body_directive(line: &str) -> Result<Option<BodyDirective>, PatternError> {
    let Some(rest) = line.trim().strip_prefix("//!") else {
        return Ok(None);
    };
    let (word, tail) = split_word(rest.trim());
    let directive = match word.to_ascii_lowercase().as_str() {
        "archive" => BodyDirective::Archive,
        "init" => BodyDirective::DefaultConstructor,
        "hook" | "awake" => BodyDirective::Hook,
        "dynamic" => BodyDirective::Dynamic,
        "log" => BodyDirective::Log,
        "super" => match quoted(tail) {
            Some(tag) => BodyDirective::SuperTag(tag.to_owned()),
            None => return Err(PatternError::SuperMissingTag),
        },
        _ => return Ok(None),
    };
    Ok(Some(directive))
}

/// `[access] (var|let) name: Type [= default] [//! directive]`
///
/// Declines for anything that is not a stored field: functions,
/// `static` members, computed properties (a `{` in the type position).
pub fn field_line(line: &str) -> Option<FieldCapture> {
    let (code, comment) = match line.find("//!") {
        Some(at) => (&line[..at], Some(line[at + 3..].trim())),
        None => (line, None),
    };
    let code = strip_line_comment(code);
    let (_, rest) = leading_modifiers(code.trim());
    let (keyword, tail) = split_word(rest);
    let mutable = match keyword {
        "var" => true,
        "let" => false,
        _ => return None,
    };
    let (name, after_colon) = tail.split_once(':')?;
    let name = name.trim();
    if name.is_empty() || name.contains(char::is_whitespace) {
        return None;
    }
    let (type_text, default) = split_default(after_colon);
    let type_text = type_text.trim();
    if type_text.is_empty() || type_text.contains('{') {
        return None;
    }

    let mut capture = FieldCapture {
        mutable,
        name: name.to_owned(),
        type_text: type_text.to_owned(),
        default,
        skip: false,
        key_override: None,
        custom_resolver: None,
        archive_only: false,
    };
    if let Some(comment) = comment {
        apply_field_directive(comment, &mut capture);
    }
    Some(capture)
}

fn apply_field_directive(comment: &str, capture: &mut FieldCapture) {
    if comment.eq_ignore_ascii_case("ignore") {
        capture.skip = true;
    } else if comment.eq_ignore_ascii_case("nojson") {
        capture.archive_only = true;
    } else if let Some(rest) = comment.strip_prefix('=') {
        if let Some(path) = quoted(rest) {
            capture.key_override = Some((path.to_owned(), true));
        }
    } else if let Some(path) = quoted(comment) {
        capture.key_override = Some((path.to_owned(), false));
    } else if let Some(rest) = comment.strip_prefix("custom") {
        let name = rest.trim();
        if !name.is_empty() {
            capture.custom_resolver = Some(name.to_owned());
        }
    }
}

/// Skip access-level and `final` modifiers; returns the access level
/// found (default internal) and the remainder.
fn leading_modifiers(mut rest: &str) -> (AccessLevel, &str) {
    let mut access = AccessLevel::default();
    loop {
        let (word, tail) = split_word(rest);
        if let Some(level) = AccessLevel::parse(word) {
            access = level;
            rest = tail;
        } else if word == "final" {
            rest = tail;
        } else {
            return (access, rest);
        }
    }
}

/// Drop a trailing ` //` comment, leaving `//!` directives alone. The
/// space requirement keeps `//` inside values such as URLs intact.
fn strip_line_comment(code: &str) -> &str {
    let mut from = 0;
    while let Some(found) = code[from..].find(" //") {
        let at = from + found;
        if code.as_bytes().get(at + 3) != Some(&b'!') {
            return &code[..at];
        }
        from = at + 3;
    }
    code
}

/// First whitespace-delimited word and the trimmed remainder.
fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(at) => (&s[..at], s[at..].trim_start()),
        None => (s, ""),
    }
}

/// Content of the first double-quoted span.
fn quoted(s: &str) -> Option<&str> {
    let rest = s.trim().strip_prefix('"')?;
    let close = rest.find('"')?;
    Some(&rest[..close])
}

/// Split `Type [= default]` on the first `=` outside brackets.
fn split_default(s: &str) -> (&str, Option<String>) {
    let mut depth = 0usize;
    for (i, b) in s.bytes().enumerate() {
        match b {
            b'[' | b'(' => depth += 1,
            b']' | b')' => depth = depth.saturating_sub(1),
            b'=' if depth == 0 => {
                let default = s[i + 1..].trim();
                let default = (!default.is_empty()).then(|| default.to_owned());
                return (&s[..i], default);
            }
            _ => {}
        }
    }
    (s, None)
}
