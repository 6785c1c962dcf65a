//! # sceneval-core — Foundational Types for sceneval
//!
//! Defines the data model of the validation engine and the pieces that
//! read it: record shapes, rule expressions, scenes, field paths, the
//! [`Subject`] contract, and the metadata reader. Every other crate in the
//! workspace depends on `sceneval-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Explicit capabilities, no reflection.** A subject describes itself
//!    through the [`Subject`] trait: a [`RecordShape`], a [`SceneMap`],
//!    message overrides, a [`RuleBook`] of custom predicates, and a
//!    whole-object check.
//!
//! 2. **Tagged scenes.** A scene is [`Scene::FieldList`] or
//!    [`Scene::FieldOverrides`]; the resolver never type-switches on
//!    untyped values. Override expressions are reported, not applied.
//!
//! 3. **Errors are tiered.** Rule failures are data. [`MetadataError`] and
//!    [`SetupError`] are hard errors that abort a call before any result
//!    is produced.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `sceneval-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod document;
pub mod error;
pub mod metadata;
pub mod path;
pub mod plan;
pub mod predicate;
pub mod rule;
pub mod scene;
pub mod shape;
pub mod subject;

// Re-export primary types for ergonomic imports.
pub use document::DocumentSubject;
pub use error::{EngineError, MetadataError, SetupError};
pub use metadata::Metadata;
pub use path::{FieldPath, Segment};
pub use plan::{FieldPlan, PlanKind, RecordPlan};
pub use predicate::{
    context_rule, value_rule, FieldContext, RuleBook, RulePredicate, SharedPredicate,
};
pub use rule::{RuleChain, RuleSpec};
pub use scene::{ResolvedScene, Scene, SceneMap, Selection, Visit};
pub use shape::{AliasEntry, FieldKind, FieldShape, RecordShape};
pub use subject::{Failures, MessageOverrides, Subject};
