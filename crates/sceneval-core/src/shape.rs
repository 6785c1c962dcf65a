//! # Record Shapes
//!
//! The declared shape of a subject type: its fields in declaration order,
//! each with a serialization key, a raw rule expression, display aliases,
//! and the kind of value it holds (plain value, nested record, or
//! collection). Shapes are plain data built with a small builder API; they
//! are interpreted by the metadata reader and the alias substitutor.
//!
//! ```
//! use sceneval_core::shape::{FieldShape, RecordShape};
//!
//! let work = RecordShape::new("Work")
//!     .field(FieldShape::new("code").rules("required").alias("代码"));
//! let example = RecordShape::new("Example")
//!     .field(FieldShape::new("title").rules("required").alias("标题"))
//!     .field(FieldShape::records("works", work).rules("gt=0,dive,required"));
//! assert_eq!(example.fields().count(), 2);
//! ```

use crate::rule::SKIP;

/// A display-name declaration for a field.
///
/// `rule` is `None` for a default alias and `Some(kind)` for a
/// `kind:alias` pair that applies only when `kind` failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasEntry {
    /// Rule kind qualifier.
    pub rule: Option<String>,
    /// The display name.
    pub name: String,
}

impl AliasEntry {
    /// Parse a comma-separated alias declaration such as `公式,gt:作品列表`.
    ///
    /// Blank entries are dropped.
    pub fn parse_list(decl: &str) -> Vec<Self> {
        decl.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|entry| match entry.split_once(':') {
                Some((rule, name)) if !rule.trim().is_empty() && !name.trim().is_empty() => Self {
                    rule: Some(rule.trim().to_string()),
                    name: name.trim().to_string(),
                },
                _ => Self {
                    rule: None,
                    name: entry.to_string(),
                },
            })
            .collect()
    }
}

/// What a field holds.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// A scalar or opaque value.
    Value,
    /// A nested record, validated field by field.
    Record(RecordShape),
    /// A collection whose elements are of the inner kind.
    List(Box<FieldKind>),
}

impl FieldKind {
    /// Peel `depth` collection levels; `None` if the kind is not that deep.
    pub fn element(&self, depth: usize) -> Option<&FieldKind> {
        let mut kind = self;
        for _ in 0..depth {
            match kind {
                FieldKind::List(inner) => kind = inner,
                _ => return None,
            }
        }
        Some(kind)
    }

    /// Number of nested collection levels.
    pub fn list_depth(&self) -> usize {
        match self {
            FieldKind::List(inner) => 1 + inner.list_depth(),
            _ => 0,
        }
    }
}

/// One declared field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldShape {
    /// Serialization key. Empty or `-` means the field is ignored.
    pub key: String,
    /// Raw rule expression, parsed by the metadata reader.
    pub rules: String,
    /// Display aliases, in declaration order.
    pub aliases: Vec<AliasEntry>,
    /// Value kind.
    pub kind: FieldKind,
    /// Explicitly excluded from validation and alias mapping.
    pub ignore: bool,
}

impl FieldShape {
    /// A plain value field.
    pub fn new(key: impl Into<String>) -> Self {
        Self::with_kind(key, FieldKind::Value)
    }

    /// A nested record field.
    pub fn record(key: impl Into<String>, shape: RecordShape) -> Self {
        Self::with_kind(key, FieldKind::Record(shape))
    }

    /// A collection of plain values.
    pub fn list(key: impl Into<String>) -> Self {
        Self::with_kind(key, FieldKind::List(Box::new(FieldKind::Value)))
    }

    /// A collection of records.
    pub fn records(key: impl Into<String>, shape: RecordShape) -> Self {
        Self::with_kind(key, FieldKind::List(Box::new(FieldKind::Record(shape))))
    }

    /// A field of an arbitrary kind.
    pub fn with_kind(key: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            key: key.into(),
            rules: String::new(),
            aliases: Vec::new(),
            kind,
            ignore: false,
        }
    }

    /// Set the rule expression.
    pub fn rules(mut self, expr: impl Into<String>) -> Self {
        self.rules = expr.into();
        self
    }

    /// Append aliases from a declaration (`标题` or `required:标题,min:长度`).
    pub fn alias(mut self, decl: &str) -> Self {
        self.aliases.extend(AliasEntry::parse_list(decl));
        self
    }

    /// Exclude the field.
    pub fn ignored(mut self) -> Self {
        self.ignore = true;
        self
    }

    /// True when the field takes no part in validation or alias mapping.
    pub fn is_ignored(&self) -> bool {
        self.ignore || self.key.is_empty() || self.key == SKIP
    }
}

/// Declared shape of a record type.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordShape {
    /// Record type name; the first segment of every failure path.
    pub name: String,
    fields: Vec<FieldShape>,
}

impl RecordShape {
    /// An empty record shape.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field.
    pub fn field(mut self, field: FieldShape) -> Self {
        self.fields.push(field);
        self
    }

    /// All declared fields, ignored ones included.
    pub fn declared(&self) -> &[FieldShape] {
        &self.fields
    }

    /// Fields taking part in validation, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldShape> {
        self.fields.iter().filter(|f| !f.is_ignored())
    }

    /// Look up an active field by key.
    pub fn field_by_key(&self, key: &str) -> Option<&FieldShape> {
        self.fields().find(|f| f.key == key)
    }

    /// Resolve a dotted key path (`author.age`) through nested records and
    /// collections of records.
    pub fn lookup(&self, key_path: &str) -> Option<&FieldShape> {
        let mut record = self;
        let mut parts = key_path.split('.').peekable();
        while let Some(part) = parts.next() {
            let field = record.field_by_key(part)?;
            if parts.peek().is_none() {
                return Some(field);
            }
            match field.kind.element(field.kind.list_depth())? {
                FieldKind::Record(inner) => record = inner,
                _ => return None,
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example() -> RecordShape {
        let author = RecordShape::new("Author")
            .field(FieldShape::new("first_name").alias("姓"))
            .field(FieldShape::new("age").rules("CheckAge").alias("年龄"));
        let work = RecordShape::new("Work")
            .field(FieldShape::new("name").alias("名字"))
            .field(FieldShape::new("code").rules("required").alias("代码"));
        RecordShape::new("Example")
            .field(FieldShape::new("id").rules("required"))
            .field(FieldShape::record("author", author))
            .field(FieldShape::records("works", work).rules("gt=0,dive,required"))
            .field(FieldShape::new("-").rules("required"))
            .field(FieldShape::new("secret").ignored())
    }

    #[test]
    fn test_alias_parse_default_and_qualified() {
        let entries = AliasEntry::parse_list("公式, gt:作品列表 ,,required:作品");
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].rule, None);
        assert_eq!(entries[0].name, "公式");
        assert_eq!(entries[1].rule.as_deref(), Some("gt"));
        assert_eq!(entries[1].name, "作品列表");
        assert_eq!(entries[2].rule.as_deref(), Some("required"));
    }

    #[test]
    fn test_alias_with_empty_side_is_default() {
        let entries = AliasEntry::parse_list(":名字");
        assert_eq!(entries[0].rule, None);
        assert_eq!(entries[0].name, ":名字");
    }

    #[test]
    fn test_ignored_fields_are_hidden() {
        let shape = example();
        let keys: Vec<&str> = shape.fields().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, vec!["id", "author", "works"]);
        assert_eq!(shape.declared().len(), 5);
        assert!(shape.field_by_key("secret").is_none());
    }

    #[test]
    fn test_lookup_nested_paths() {
        let shape = example();
        assert_eq!(shape.lookup("author.age").map(|f| f.key.as_str()), Some("age"));
        assert_eq!(shape.lookup("works.code").map(|f| f.key.as_str()), Some("code"));
        assert!(shape.lookup("id.nope").is_none());
        assert!(shape.lookup("missing").is_none());
    }

    #[test]
    fn test_kind_element_depth() {
        let kind = FieldKind::List(Box::new(FieldKind::List(Box::new(FieldKind::Value))));
        assert_eq!(kind.list_depth(), 2);
        assert_eq!(kind.element(2), Some(&FieldKind::Value));
        assert!(kind.element(3).is_none());
    }
}
