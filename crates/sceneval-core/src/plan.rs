//! # Rule Plans
//!
//! A [`RecordPlan`] is a [`RecordShape`] with every rule expression parsed
//! and checked: duplicate keys, unparsable expressions, and `dive` on a
//! field that is not a collection are rejected here, before any rule runs.
//! Fields marked `-` are dropped from the plan.

use std::collections::BTreeSet;

use crate::error::MetadataError;
use crate::rule::RuleChain;
use crate::shape::{FieldKind, RecordShape};

/// Value kind of a planned field.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanKind {
    /// Scalar or opaque value.
    Value,
    /// Nested record.
    Record(RecordPlan),
    /// Collection of the inner kind.
    List(Box<PlanKind>),
}

/// A field ready for execution.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldPlan {
    /// Serialization key.
    pub key: String,
    /// Parsed rules.
    pub chain: RuleChain,
    /// Value kind.
    pub kind: PlanKind,
}

/// A record ready for execution.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordPlan {
    /// Record type name.
    pub name: String,
    /// Fields in declaration order.
    pub fields: Vec<FieldPlan>,
}

impl RecordPlan {
    /// Parse and check every rule expression of `shape`, recursively.
    pub fn compile(shape: &RecordShape) -> Result<Self, MetadataError> {
        let mut seen = BTreeSet::new();
        let mut fields = Vec::new();
        for field in shape.fields() {
            if !seen.insert(field.key.as_str()) {
                return Err(MetadataError::DuplicateField {
                    record: shape.name.clone(),
                    key: field.key.clone(),
                });
            }
            let invalid = |reason: String| MetadataError::InvalidRule {
                record: shape.name.clone(),
                field: field.key.clone(),
                expr: field.rules.clone(),
                reason,
            };
            let chain = RuleChain::parse(&field.rules).map_err(invalid)?;
            if chain.skip {
                continue;
            }
            if chain.dive_depth() > field.kind.list_depth() {
                return Err(invalid("dive requires a collection field".to_string()));
            }
            fields.push(FieldPlan {
                key: field.key.clone(),
                chain,
                kind: compile_kind(&field.kind)?,
            });
        }
        Ok(Self {
            name: shape.name.clone(),
            fields,
        })
    }

    /// Every `(record-qualified key path, rule kind)` pair in the plan.
    pub fn rule_kinds(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        collect_kinds(self, &self.name, &mut out);
        out
    }
}

fn compile_kind(kind: &FieldKind) -> Result<PlanKind, MetadataError> {
    Ok(match kind {
        FieldKind::Value => PlanKind::Value,
        FieldKind::Record(shape) => PlanKind::Record(RecordPlan::compile(shape)?),
        FieldKind::List(inner) => PlanKind::List(Box::new(compile_kind(inner)?)),
    })
}

fn collect_kinds(record: &RecordPlan, prefix: &str, out: &mut Vec<(String, String)>) {
    for field in &record.fields {
        let path = format!("{prefix}.{}", field.key);
        for kind in field.chain.kinds() {
            out.push((path.clone(), kind.to_string()));
        }
        let mut kind = &field.kind;
        while let PlanKind::List(inner) = kind {
            kind = inner;
        }
        if let PlanKind::Record(inner) = kind {
            collect_kinds(inner, &path, out);
        }
    }
}
