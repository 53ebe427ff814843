//! Parsed key-path expressions.
//!
//! A [`PathExpression`] is an ordered fallback chain: alternatives are
//! separated by `??` and tried left to right, each alternative is a
//! `/`-separated list of segments, and a segment is a plain key or a
//! key with an array index (`items[2]`).
//!
//! Parsing is total: a component whose bracket suffix is not a valid
//! index (`a[x]`, `a[`) is kept verbatim as a plain key, so resolution
//! simply misses instead of erroring. This mirrors the resolve-time
//! behavior the generated code relies on.

use std::fmt;

use smallvec::SmallVec;

/// One step through a document: a key, optionally followed by an index
/// into the sequence found under that key.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Segment {
    /// The object key to look up.
    pub key: String,
    /// When present, the key must resolve to a sequence and the cursor
    /// advances to this element.
    pub index: Option<usize>,
}

impl Segment {
    /// Create a plain (non-indexed) segment.
    #[inline]
    pub fn plain(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            index: None,
        }
    }

    /// Create an array-indexed segment.
    #[inline]
    pub fn indexed(key: impl Into<String>, index: usize) -> Self {
        Self {
            key: key.into(),
            index: Some(index),
        }
    }

    /// Parse one path component. `key[N]` with a well-formed numeric
    /// suffix becomes an indexed segment; anything else is a plain key.
    pub fn parse(component: &str) -> Self {
        if let Some(open) = component.find('[') {
            if let Some(stripped) = component.ends_with(']').then(|| &component[open + 1..component.len() - 1]) {
                if let Ok(index) = stripped.parse::<usize>() {
                    return Self::indexed(&component[..open], index);
                }
            }
        }
        Self::plain(component)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}[{index}]", self.key),
            None => f.write_str(&self.key),
        }
    }
}

/// One full candidate route to a value: an ordered list of segments.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct KeyPath {
    pub segments: SmallVec<[Segment; 4]>,
}

impl KeyPath {
    /// Parse a `/`-separated path such as `profile/images[0]/url`.
    pub fn parse(path: &str) -> Self {
        Self {
            segments: path.split('/').map(|c| Segment::parse(c.trim())).collect(),
        }
    }

    /// A single-segment path for a bare field name.
    pub fn key(key: impl Into<String>) -> Self {
        let mut segments = SmallVec::new();
        segments.push(Segment::plain(key));
        Self { segments }
    }

    /// Apply a key transform to every segment (casing conventions).
    pub fn map_keys(&self, f: impl Fn(&str) -> String) -> Self {
        Self {
            segments: self
                .segments
                .iter()
                .map(|s| Segment {
                    key: f(&s.key),
                    index: s.index,
                })
                .collect(),
        }
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

/// A parsed key reference: alternatives tried in declared order, the
/// first one that fully resolves wins.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct PathExpression {
    pub alternatives: SmallVec<[KeyPath; 2]>,
}

impl PathExpression {
    /// Parse a full expression: alternatives split on `??`, each then
    /// parsed as a [`KeyPath`].
    pub fn parse(expr: &str) -> Self {
        Self {
            alternatives: expr.split("??").map(|alt| KeyPath::parse(alt.trim())).collect(),
        }
    }

    /// A single-alternative, single-segment expression for a bare
    /// field name (the default when no key override is given).
    pub fn key(key: impl Into<String>) -> Self {
        let mut alternatives = SmallVec::new();
        alternatives.push(KeyPath::key(key));
        Self { alternatives }
    }

    /// The first (primary) alternative. Represent writes here.
    ///
    /// # Panics
    ///
    /// Never: parsing always yields at least one alternative, and both
    /// constructors guarantee it.
    pub fn primary(&self) -> &KeyPath {
        &self.alternatives[0]
    }

    /// Apply a key transform to every segment of every alternative.
    pub fn map_keys(&self, f: impl Fn(&str) -> String) -> Self {
        Self {
            alternatives: self.alternatives.iter().map(|a| a.map_keys(&f)).collect(),
        }
    }

    /// True when this is a bare single key with no nesting, no index,
    /// and no fallback — the common case the emitter special-cases.
    pub fn is_bare_key(&self) -> bool {
        self.alternatives.len() == 1
            && self.alternatives[0].segments.len() == 1
            && self.alternatives[0].segments[0].index.is_none()
    }
}

impl fmt::Display for PathExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, alt) in self.alternatives.iter().enumerate() {
            if i > 0 {
                f.write_str(" ?? ")?;
            }
            write!(f, "{alt}")?;
        }
        Ok(())
    }
}
