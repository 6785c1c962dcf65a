//! # Rule Executor
//!
//! Walks a serialized subject along its [`RecordPlan`] and runs each
//! field's rule chain against the bound [`RuleTable`].
//!
//! - Within one level the chain stops at its first failing rule.
//!   `omitempty` stops it silently when the value is empty.
//! - Nested records are descended automatically. Collections are only
//!   descended when the chain contains `dive`; each element's path carries
//!   its index (`works[0]`).
//! - A [`Selection`] limits which fields run their rules. Fields above a
//!   selected key are descended without running their own rules.

use sceneval_core::rule::OMITEMPTY;
use sceneval_core::{FieldContext, FieldPath, PlanKind, RecordPlan, RuleChain, Selection, Visit};
use serde_json::Value;

use crate::registry::RuleTable;
use crate::value::{is_empty, ValueClass};

static NULL: Value = Value::Null;

/// One failed rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleFailure {
    /// Where the failing value sits, including collection indices.
    pub path: FieldPath,
    /// Failing rule kind.
    pub kind: String,
    /// Rule parameter, if any.
    pub param: Option<String>,
    /// Class of the failing value, used to pick the message variant.
    pub class: ValueClass,
}

/// Run every selected rule of `plan` against `value`.
///
/// Failures come back in traversal order: declaration order of fields,
/// ascending element index within a dive.
pub fn execute(
    plan: &RecordPlan,
    value: &Value,
    table: &RuleTable,
    selection: &Selection,
) -> Vec<RuleFailure> {
    let mut exec = Executor {
        table,
        selection,
        failures: Vec::new(),
    };
    exec.walk_record(plan, value, &FieldPath::root(&plan.name));
    exec.failures
}

struct Executor<'a> {
    table: &'a RuleTable,
    selection: &'a Selection,
    failures: Vec<RuleFailure>,
}

impl Executor<'_> {
    fn walk_record(&mut self, plan: &RecordPlan, record: &Value, path: &FieldPath) {
        for field in &plan.fields {
            let field_path = path.child(&field.key);
            let run = match self.selection.visit(&field_path.key_path()) {
                Visit::Skip => continue,
                Visit::Full => true,
                Visit::Descend => false,
            };
            let value = record.get(&field.key).unwrap_or(&NULL);
            self.run_level(Some(&field.chain), &field.kind, value, record, &field_path, run);
        }
    }

    fn run_level(
        &mut self,
        chain: Option<&RuleChain>,
        kind: &PlanKind,
        value: &Value,
        record: &Value,
        path: &FieldPath,
        run: bool,
    ) {
        if run {
            if let Some(chain) = chain {
                if !self.run_rules(chain, value, record, path) {
                    return;
                }
            }
        }

        match kind {
            PlanKind::Value => {}
            PlanKind::Record(inner) => {
                if value.is_object() {
                    self.walk_record(inner, value, path);
                }
            }
            PlanKind::List(element) => {
                let (Some(dive), Some(items)) =
                    (chain.and_then(|c| c.dive.as_deref()), value.as_array())
                else {
                    return;
                };
                for (i, item) in items.iter().enumerate() {
                    self.run_level(Some(dive), element, item, record, &path.indexed(i), run);
                }
            }
        }
    }

    /// Returns false when the level should stop.
    fn run_rules(
        &mut self,
        chain: &RuleChain,
        value: &Value,
        record: &Value,
        path: &FieldPath,
    ) -> bool {
        for spec in &chain.rules {
            if spec.kind == OMITEMPTY {
                if is_empty(value) {
                    return false;
                }
                continue;
            }
            let Some(predicate) = self.table.get(&spec.kind) else {
                tracing::debug!(rule = %spec.kind, path = %path, "rule not bound, skipping");
                continue;
            };
            let ctx = FieldContext::new(value, spec.param.as_deref(), record, path);
            if !predicate.check(&ctx) {
                self.failures.push(RuleFailure {
                    path: path.clone(),
                    kind: spec.kind.clone(),
                    param: spec.param.clone(),
                    class: ValueClass::of(value),
                });
                return false;
            }
        }
        true
    }
}
