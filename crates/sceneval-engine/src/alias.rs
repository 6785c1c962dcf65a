//! # Alias Substitution
//!
//! Resolves the display names declared for the field a failure points at,
//! and rewrites literal mentions of the field's internal key in a rendered
//! message.
//!
//! Resolution walks the failure path from the first segment after the
//! record name. Collection indices on a segment mean the next step descends
//! into the collection's element type. Any segment that does not resolve
//! yields an empty [`AliasMap`], and the message is left as rendered.

use std::collections::BTreeMap;

use regex::RegexBuilder;
use sceneval_core::{FieldKind, FieldPath, RecordShape};

/// Display names of one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasMap {
    key: String,
    default: Option<String>,
    by_rule: BTreeMap<String, String>,
}

impl AliasMap {
    /// The field's internal key. Empty when nothing resolved.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Alias used when no rule-specific one applies.
    pub fn default_alias(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// Alias for a failing rule kind: the rule-specific alias, else the
    /// default alias.
    pub fn for_rule(&self, kind: &str) -> Option<&str> {
        self.by_rule
            .get(kind)
            .map(String::as_str)
            .or(self.default.as_deref())
    }

    /// Name to show for a failing rule kind, falling back to the key.
    pub fn display(&self, kind: &str) -> &str {
        self.for_rule(kind).unwrap_or(&self.key)
    }

    /// True when no alias is declared.
    pub fn is_empty(&self) -> bool {
        self.default.is_none() && self.by_rule.is_empty()
    }
}

/// Resolve the aliases declared for the field `path` points at.
pub fn resolve_aliases(shape: &RecordShape, path: &FieldPath) -> AliasMap {
    let Some((last, parents)) = path.segments().split_last() else {
        return AliasMap::default();
    };
    let mut record = shape;
    for segment in parents {
        let Some(field) = record.field_by_key(&segment.key) else {
            return AliasMap::default();
        };
        match field.kind.element(segment.indices.len()) {
            Some(FieldKind::Record(inner)) => record = inner,
            _ => return AliasMap::default(),
        }
    }
    let Some(field) = record.field_by_key(&last.key) else {
        return AliasMap::default();
    };

    let mut map = AliasMap {
        key: field.key.clone(),
        ..AliasMap::default()
    };
    for entry in &field.aliases {
        match &entry.rule {
            Some(kind) => {
                map.by_rule.insert(kind.clone(), entry.name.clone());
            }
            None => map.default = Some(entry.name.clone()),
        }
    }
    map
}

fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Replace whole-word, case-insensitive mentions of `key` with `alias`.
///
/// A word boundary is any character outside `[A-Za-z0-9_]`, so a key
/// directly followed by CJK text still matches.
pub fn humanize(message: &str, key: &str, alias: &str) -> String {
    if key.is_empty() || key == alias {
        return message.to_string();
    }
    let Ok(re) = RegexBuilder::new(&regex::escape(key))
        .case_insensitive(true)
        .build()
    else {
        return message.to_string();
    };

    let mut out = String::with_capacity(message.len());
    let mut last = 0;
    for m in re.find_iter(message) {
        let before = message[..m.start()].chars().next_back();
        let after = message[m.end()..].chars().next();
        if before.is_some_and(is_word) || after.is_some_and(is_word) {
            continue;
        }
        out.push_str(&message[last..m.start()]);
        out.push_str(alias);
        last = m.end();
    }
    out.push_str(&message[last..]);
    out
}
