//! Exact brace-depth tracking.
//!
//! A naive per-line brace counter miscounts braces inside string and
//! comment literals. This tokenizer walks each line byte by byte,
//! skipping string spans (with escapes), line comments, and block
//! comments (which may span lines — the open state carries over in
//! [`DepthTracker`]), and counts only structural braces.

use memchr::memchr2;

/// Carried across lines: whether the previous line left a `/* ... */`
/// span open.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DepthTracker {
    depth: i32,
    in_block_comment: bool,
}

impl DepthTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current nesting depth, after the last [`feed`](Self::feed).
    #[inline]
    pub fn depth(&self) -> i32 {
        self.depth
    }

    /// True while inside an unterminated block comment.
    #[inline]
    pub fn in_comment(&self) -> bool {
        self.in_block_comment
    }

    /// Consume one source line and update the depth. Returns the new
    /// depth.
    pub fn feed(&mut self, line: &str) -> i32 {
        let bytes = line.as_bytes();
        let mut i = 0;

        while i < bytes.len() {
            if self.in_block_comment {
                // Only `*/` matters until the span closes.
                match find_block_close(bytes, i) {
                    Some(end) => {
                        self.in_block_comment = false;
                        i = end;
                    }
                    None => return self.depth,
                }
                continue;
            }

            match bytes[i] {
                b'{' => {
                    self.depth += 1;
                    i += 1;
                }
                b'}' => {
                    self.depth -= 1;
                    i += 1;
                }
                b'"' => i = skip_string(bytes, i + 1),
                b'/' if bytes.get(i + 1) == Some(&b'/') => {
                    // Line comment: the rest of the line is opaque.
                    return self.depth;
                }
                b'/' if bytes.get(i + 1) == Some(&b'*') => {
                    self.in_block_comment = true;
                    i += 2;
                }
                _ => i += 1,
            }
        }

        self.depth
    }
}

/// Advance past a string literal body. `start` is the byte after the
/// opening quote; returns the byte after the closing quote, or the end
/// of line for an unterminated literal.
fn skip_string(bytes: &[u8], mut start: usize) -> usize {
    while let Some(found) = memchr2(b'"', b'\\', &bytes[start..]) {
        let at = start + found;
        if bytes[at] == b'"' {
            return at + 1;
        }
        // Escape: skip the escaped byte too.
        start = at + 2;
        if start > bytes.len() {
            break;
        }
    }
    bytes.len()
}

/// Byte after the first `*/` at or after `from`, when present.
fn find_block_close(bytes: &[u8], from: usize) -> Option<usize> {
    let mut i = from;
    while let Some(found) = memchr::memchr(b'*', &bytes[i..]) {
        let at = i + found;
        if bytes.get(at + 1) == Some(&b'/') {
            return Some(at + 2);
        }
        i = at + 1;
    }
    None
}
