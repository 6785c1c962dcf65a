//! # Rule Predicates
//!
//! A rule predicate decides pass/fail for one value. Every predicate, built
//! in or subject-supplied, implements [`RulePredicate`] over a read-only
//! [`FieldContext`]. Predicates that only look at the raw value are wrapped
//! with [`value_rule`]; predicates that need the rule parameter or sibling
//! fields use [`context_rule`].
//!
//! Subjects publish their custom predicates as a [`RuleBook`], a mapping of
//! rule-kind name to predicate.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::path::FieldPath;

/// Read-only view of the value under test.
#[derive(Debug, Clone, Copy)]
pub struct FieldContext<'a> {
    value: &'a Value,
    param: Option<&'a str>,
    record: &'a Value,
    path: &'a FieldPath,
}

impl<'a> FieldContext<'a> {
    /// Build a context. `record` is the nearest enclosing record value.
    pub fn new(
        value: &'a Value,
        param: Option<&'a str>,
        record: &'a Value,
        path: &'a FieldPath,
    ) -> Self {
        Self {
            value,
            param,
            record,
            path,
        }
    }

    /// The value under test. Missing fields appear as `Null`.
    pub fn value(&self) -> &'a Value {
        self.value
    }

    /// The rule parameter (`3` in `min=3`).
    pub fn param(&self) -> Option<&'a str> {
        self.param
    }

    /// The enclosing record.
    pub fn record(&self) -> &'a Value {
        self.record
    }

    /// Look up a sibling field of the enclosing record by key.
    pub fn sibling(&self, key: &str) -> Option<&'a Value> {
        self.record.as_object()?.get(key)
    }

    /// Path of the value under test.
    pub fn path(&self) -> &'a FieldPath {
        self.path
    }
}

/// A named check over one field value.
pub trait RulePredicate: Send + Sync {
    /// Return `true` when the value passes.
    fn check(&self, ctx: &FieldContext<'_>) -> bool;
}

/// Adapter for predicates over the raw value only.
pub struct ValueRule<F>(F);

impl<F> RulePredicate for ValueRule<F>
where
    F: Fn(&Value) -> bool + Send + Sync,
{
    fn check(&self, ctx: &FieldContext<'_>) -> bool {
        (self.0)(ctx.value())
    }
}

/// Adapter for predicates over the full field context.
pub struct ContextRule<F>(F);

impl<F> RulePredicate for ContextRule<F>
where
    F: Fn(&FieldContext<'_>) -> bool + Send + Sync,
{
    fn check(&self, ctx: &FieldContext<'_>) -> bool {
        (self.0)(ctx)
    }
}

/// Wrap a raw-value predicate.
pub fn value_rule<F>(f: F) -> ValueRule<F>
where
    F: Fn(&Value) -> bool + Send + Sync,
{
    ValueRule(f)
}

/// Wrap a field-context predicate.
pub fn context_rule<F>(f: F) -> ContextRule<F>
where
    F: Fn(&FieldContext<'_>) -> bool + Send + Sync,
{
    ContextRule(f)
}

/// Shared, type-erased predicate.
pub type SharedPredicate = Arc<dyn RulePredicate>;

/// Custom predicates declared by a subject type, by rule-kind name.
#[derive(Clone, Default)]
pub struct RuleBook {
    rules: BTreeMap<String, SharedPredicate>,
}

impl fmt::Debug for RuleBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleBook")
            .field("rules", &self.rules.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl RuleBook {
    /// An empty rule book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a predicate under `name`. A later entry with the same name wins.
    pub fn rule(
        mut self,
        name: impl Into<String>,
        predicate: impl RulePredicate + 'static,
    ) -> Self {
        self.rules.insert(name.into(), Arc::new(predicate));
        self
    }

    /// Add a raw-value predicate.
    pub fn value<F>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.rule(name, value_rule(f))
    }

    /// Add a field-context predicate.
    pub fn context<F>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&FieldContext<'_>) -> bool + Send + Sync + 'static,
    {
        self.rule(name, context_rule(f))
    }

    /// Iterate entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SharedPredicate)> {
        self.rules.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Look up a predicate.
    pub fn get(&self, name: &str) -> Option<&SharedPredicate> {
        self.rules.get(name)
    }

    /// Number of predicates.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when the book is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
