//! # sceneval-rules — Rule Predicates & Execution
//!
//! Everything that decides pass/fail for a field value.
//!
//! ## Built-in Library (`builtin`)
//!
//! [`builtins`] returns the rule kinds every subject may use without
//! declaring them: `required`, the measuring rules (`len`, `min`, `max`,
//! `gt`, `gte`, `lt`, `lte`), `eq`, `ne`, `oneof`, and the text classes
//! `email`, `alpha`, `alphanum`, `numeric`.
//!
//! ## Registry (`registry`)
//!
//! [`RuleRegistry::bind`] layers a subject type's own [`RuleBook`] over the
//! built-ins and caches the resulting [`RuleTable`] per type. The cache is
//! guarded by a `parking_lot::RwLock`, so one registry serves concurrent
//! validation calls.
//!
//! ## Execution (`exec`)
//!
//! [`execute`] walks a serialized subject along its compiled plan, honoring
//! the scene selection, `omitempty`, and `dive`, and returns every
//! [`RuleFailure`] with its indexed path.
//!
//! ## Crate Policy
//!
//! - Depends only on `sceneval-core` internally.
//! - Predicates never panic; a parameter that does not parse fails the rule.
//!
//! [`RuleBook`]: sceneval_core::RuleBook

pub mod builtin;
pub mod exec;
pub mod registry;
pub mod value;

pub use builtin::{builtins, BUILTIN_KINDS};
pub use exec::{execute, RuleFailure};
pub use registry::{RuleRegistry, RuleTable};
pub use value::ValueClass;
