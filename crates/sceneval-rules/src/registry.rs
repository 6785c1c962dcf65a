//! # Rule Registry
//!
//! Binds each subject type's custom predicates on top of the built-in
//! library and caches the resulting [`RuleTable`] by
//! [`Subject::type_key`]. Bindings depend only on the subject type, so a
//! cached table is reused for every later instance of that type.
//!
//! ## Thread Safety
//!
//! `RuleRegistry` is `Send + Sync`. Lookups take a shared lock; a miss
//! builds the table outside the lock and inserts it under an exclusive
//! lock. Two threads racing on the same type may both build a table; the
//! first insert wins and both get equivalent tables.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use sceneval_core::rule::is_keyword;
use sceneval_core::{MetadataError, RecordPlan, RuleBook, SharedPredicate, Subject};

use crate::builtin::builtins;

/// Predicates available to one subject type: built-ins plus its own rules.
#[derive(Clone)]
pub struct RuleTable {
    rules: HashMap<String, SharedPredicate>,
}

impl fmt::Debug for RuleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        f.debug_struct("RuleTable").field("kinds", &kinds).finish()
    }
}

impl RuleTable {
    pub(crate) fn from_books(builtin: &RuleBook, custom: &RuleBook) -> Self {
        let mut rules: HashMap<String, SharedPredicate> = builtin
            .iter()
            .map(|(name, pred)| (name.to_string(), Arc::clone(pred)))
            .collect();
        for (name, pred) in custom.iter() {
            if name.is_empty() || is_keyword(name) {
                tracing::warn!(rule = name, "skipping custom rule with a reserved name");
                continue;
            }
            rules.insert(name.to_string(), Arc::clone(pred));
        }
        Self { rules }
    }

    /// Look up a predicate by rule kind.
    pub fn get(&self, kind: &str) -> Option<&SharedPredicate> {
        self.rules.get(kind)
    }

    /// True when `kind` is bound.
    pub fn contains(&self, kind: &str) -> bool {
        self.rules.contains_key(kind)
    }

    /// Number of bound predicates.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Check that every rule kind the plan references is bound.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::UnknownRule`] for the first unbound kind.
    pub fn ensure_known(&self, plan: &RecordPlan) -> Result<(), MetadataError> {
        match plan
            .rule_kinds()
            .into_iter()
            .find(|(_, kind)| !self.contains(kind))
        {
            Some((path, kind)) => Err(MetadataError::UnknownRule { path, kind }),
            None => Ok(()),
        }
    }
}

/// Per-subject-type cache of rule tables.
pub struct RuleRegistry {
    builtins: RuleBook,
    bound: RwLock<HashMap<String, Arc<RuleTable>>>,
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("builtins", &self.builtins.len())
            .field("bound_types", &self.bound_types())
            .finish()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleRegistry {
    /// A registry over the built-in predicate library.
    pub fn new() -> Self {
        Self::with_builtins(builtins())
    }

    /// A registry over a custom base library.
    pub fn with_builtins(builtins: RuleBook) -> Self {
        Self {
            builtins,
            bound: RwLock::new(HashMap::new()),
        }
    }

    /// Bind the subject's custom rules, or return the cached binding for
    /// its type.
    pub fn bind<S: Subject + ?Sized>(&self, subject: &S) -> Arc<RuleTable> {
        let key = subject.type_key();
        if let Some(table) = self.bound.read().get(&key) {
            tracing::debug!(subject = %key, "rule table cache hit");
            return Arc::clone(table);
        }

        let custom = subject.rule_book();
        let table = Arc::new(RuleTable::from_books(&self.builtins, &custom));
        tracing::debug!(
            subject = %key,
            custom = custom.len(),
            total = table.len(),
            "bound rule table"
        );
        Arc::clone(self.bound.write().entry(key).or_insert(table))
    }

    /// Number of subject types bound so far.
    pub fn bound_types(&self) -> usize {
        self.bound.read().len()
    }
}
