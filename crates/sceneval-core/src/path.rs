//! # Field Paths
//!
//! A [`FieldPath`] locates one value inside a subject: the root record
//! name followed by field-key segments, each optionally carrying the
//! collection indices a `dive` walked through (`Example.works[0].code`).
//!
//! Paths are built structurally by the rule executor and parsed back from
//! their dotted text form by the alias substitutor.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// One step of a path: a field key plus any trailing collection indices.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Segment {
    /// Field key (serialization name).
    pub key: String,
    /// Collection indices, outermost first. Empty for plain fields.
    pub indices: Vec<usize>,
}

impl Segment {
    /// A plain segment with no indices.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            indices: Vec::new(),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)?;
        for i in &self.indices {
            write!(f, "[{i}]")?;
        }
        Ok(())
    }
}

/// Record-rooted path to a field value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    root: String,
    segments: Vec<Segment>,
}

fn segment_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^([^\[\]]+)((?:\[[0-9]+\])*)$").ok())
        .as_ref()
}

fn index_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"\[([0-9]+)\]").ok())
        .as_ref()
}

impl FieldPath {
    /// A path pointing at the root record itself.
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            root: name.into(),
            segments: Vec::new(),
        }
    }

    /// Parse the dotted text form, e.g. `Example.works[0].code`.
    ///
    /// Returns `None` when the text is empty or a segment is not of the
    /// form `key` or `key[n]...`.
    pub fn parse(text: &str) -> Option<Self> {
        let mut parts = text.split('.');
        let root = parts.next().filter(|r| !r.is_empty())?;
        let (segment_re, index_re) = (segment_pattern()?, index_pattern()?);
        let mut path = Self::root(root);
        for part in parts {
            let caps = segment_re.captures(part)?;
            let key = caps.get(1)?.as_str();
            let indices = match caps.get(2) {
                Some(m) => index_re
                    .captures_iter(m.as_str())
                    .filter_map(|c| c.get(1)?.as_str().parse().ok())
                    .collect(),
                None => Vec::new(),
            };
            path.segments.push(Segment {
                key: key.to_string(),
                indices,
            });
        }
        Some(path)
    }

    /// Name of the root record.
    pub fn record(&self) -> &str {
        &self.root
    }

    /// Segments after the root record.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The last segment, if the path points below the root.
    pub fn terminal(&self) -> Option<&Segment> {
        self.segments.last()
    }

    /// Extend with a field key.
    pub fn child(&self, key: &str) -> Self {
        let mut next = self.clone();
        next.segments.push(Segment::new(key));
        next
    }

    /// Extend the terminal segment with a collection index.
    ///
    /// On a root-only path the index has nowhere to attach and is dropped.
    pub fn indexed(&self, index: usize) -> Self {
        let mut next = self.clone();
        if let Some(last) = next.segments.last_mut() {
            last.indices.push(index);
        }
        next
    }

    /// The record-relative form used for failure keys: `works[0].code`.
    pub fn relative(&self) -> String {
        self.segments
            .iter()
            .map(Segment::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Record-relative form with the terminal key replaced by `label`.
    pub fn relative_with_terminal(&self, label: &str) -> String {
        let mut parts: Vec<String> = self.segments.iter().map(Segment::to_string).collect();
        if let (Some(last), Some(seg)) = (parts.last_mut(), self.segments.last()) {
            let mut renamed = Segment::new(label);
            renamed.indices = seg.indices.clone();
            *last = renamed.to_string();
        }
        parts.join(".")
    }

    /// Dotted keys without indices, as used by scene selections: `works.code`.
    pub fn key_path(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.key.as_str())
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.root)?;
        for seg in &self.segments {
            write!(f, ".{seg}")?;
        }
        Ok(())
    }
}
