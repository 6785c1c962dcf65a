//! # Subject Contract
//!
//! A subject is any serializable record that describes its own validation
//! metadata. The only required accessor is [`Subject::shape`]; every other
//! accessor has an empty default. Instance data is read through `serde`,
//! so field keys are the serialization names.
//!
//! ```
//! use sceneval_core::{FieldShape, RecordShape, Scene, SceneMap, Subject};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Login {
//!     user: String,
//! }
//!
//! impl Subject for Login {
//!     fn shape(&self) -> RecordShape {
//!         RecordShape::new("Login").field(FieldShape::new("user").rules("required"))
//!     }
//!
//!     fn scenes(&self) -> Result<SceneMap, sceneval_core::MetadataError> {
//!         Ok(SceneMap::new().scene("signin", Scene::fields(["user"])))
//!     }
//! }
//! ```

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::MetadataError;
use crate::predicate::RuleBook;
use crate::scene::SceneMap;
use crate::shape::RecordShape;

/// Failure key → rendered message.
pub type Failures = BTreeMap<String, String>;

/// Rule kind → message template with an optional `{0}` placeholder.
pub type MessageOverrides = BTreeMap<String, String>;

/// A record that can be validated.
pub trait Subject: Serialize {
    /// Declared fields, rules, and aliases.
    fn shape(&self) -> RecordShape;

    /// Identity used to cache custom-rule bindings. Instances with equal
    /// keys must return equivalent [`Subject::rule_book`]s.
    fn type_key(&self) -> String {
        std::any::type_name::<Self>().to_string()
    }

    /// Per-scene field selections.
    fn scenes(&self) -> Result<SceneMap, MetadataError> {
        Ok(SceneMap::new())
    }

    /// Per-rule-kind message templates overriding the catalog defaults.
    fn message_overrides(&self) -> Result<MessageOverrides, MetadataError> {
        Ok(MessageOverrides::new())
    }

    /// Custom predicates. Consulted once per [`Subject::type_key`], so the
    /// predicates must not depend on instance data.
    fn rule_book(&self) -> RuleBook {
        RuleBook::new()
    }

    /// Cross-field check run after the field rules. Entries never replace a
    /// field-rule failure with the same key.
    fn whole_check(&self, _scene: &str) -> Result<Failures, MetadataError> {
        Ok(Failures::new())
    }
}
