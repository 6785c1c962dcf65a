//! # sceneval-engine — Scene-Aware Validation
//!
//! The entry point of the workspace. A [`Validator`] takes any
//! [`Subject`](sceneval_core::Subject), validates the fields its scene
//! selects, renders localized messages with the field's display names, and
//! merges the subject's whole-object check.
//!
//! ```
//! use sceneval_core::{FieldShape, RecordShape, Subject};
//! use sceneval_engine::Validator;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Note {
//!     title: String,
//! }
//!
//! impl Subject for Note {
//!     fn shape(&self) -> RecordShape {
//!         RecordShape::new("Note")
//!             .field(FieldShape::new("title").rules("required").alias("标题"))
//!     }
//! }
//!
//! let outcome = Validator::new()
//!     .validate(&Note { title: String::new() }, "", None)
//!     .unwrap();
//! assert_eq!(outcome.failures()["title"], "标题为必填字段");
//! ```
//!
//! ## Key Design Principles
//!
//! 1. **Failures are data.** [`Outcome::Fail`] carries the mapping; only
//!    malformed metadata and translator setup produce an error.
//!
//! 2. **First writer wins.** Rule failures are keyed first; whole-object
//!    entries never replace them.
//!
//! 3. **No ambient state.** The rule registry and translators belong to a
//!    [`Validator`]; two validators never share bindings.
//!
//! ## Crate Policy
//!
//! - Depends on `sceneval-core`, `sceneval-rules`, and `sceneval-i18n`.
//! - Scene rule overrides are reported with a warning, never applied.

pub mod alias;
pub mod options;
pub mod validator;

pub use alias::{humanize, resolve_aliases, AliasMap};
pub use options::{KeyStyle, ValidationOptions};
pub use validator::{Outcome, Validator};
