//! # Error Types — Structured Error Hierarchy
//!
//! Defines the hard errors of the validation engine. Ordinary rule
//! failures are never errors; they travel as data in the outcome. All
//! errors use `thiserror` for derive-based `Display` and `Error`.
//!
//! ## Design
//!
//! - Metadata errors name the record, field, and offending declaration.
//! - Setup errors name the locale or template that could not be registered.
//! - Either tier aborts the call before any failure mapping is produced.

use thiserror::Error;

/// Top-level error type returned by a validation call.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The subject declared metadata the engine cannot interpret.
    #[error("malformed metadata: {0}")]
    Metadata(#[from] MetadataError),

    /// The translator could not be set up for the requested locale.
    #[error("translator setup failed: {0}")]
    Setup(#[from] SetupError),

    /// The subject instance could not be serialized into a value tree.
    #[error("subject serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A subject accessor or declaration has a shape the engine cannot use.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetadataError {
    /// The scenes accessor did not return `scene -> (list | map)`.
    #[error("scenes returned an unsupported shape: {reason}")]
    SceneShape {
        /// What was wrong with the returned value.
        reason: String,
    },

    /// The message overrides accessor did not return `rule-kind -> string`.
    #[error("message overrides returned an unsupported shape: {reason}")]
    MessageShape {
        /// What was wrong with the returned value.
        reason: String,
    },

    /// The whole-object check did not return `field-key -> string`.
    #[error("whole check for scene '{scene}' returned an unsupported shape: {reason}")]
    WholeCheckShape {
        /// Scene name the check was invoked with.
        scene: String,
        /// What was wrong with the returned value.
        reason: String,
    },

    /// A field's rule expression does not parse.
    #[error("field '{record}.{field}' declares invalid rules '{expr}': {reason}")]
    InvalidRule {
        /// Record declaring the field.
        record: String,
        /// Field key.
        field: String,
        /// The raw rule expression.
        expr: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A rule kind is neither built in nor bound by the subject.
    #[error("field '{path}' references undefined rule '{kind}'")]
    UnknownRule {
        /// Record-qualified key path of the field.
        path: String,
        /// The unknown rule kind.
        kind: String,
    },

    /// Two fields of one record share a key.
    #[error("record '{record}' declares field key '{key}' more than once")]
    DuplicateField {
        /// Record name.
        record: String,
        /// The repeated key.
        key: String,
    },

    /// A record descriptor could not be read.
    #[error("record descriptor is malformed: {0}")]
    Descriptor(String),
}

/// The message translator could not be prepared.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    /// No catalog exists for the requested locale.
    #[error("unsupported locale '{0}'")]
    UnsupportedLocale(String),

    /// A default or override template failed to register.
    #[error("template for rule '{kind}' is invalid ({template:?}): {reason}")]
    InvalidTemplate {
        /// Rule kind (or catalog key) the template belongs to.
        kind: String,
        /// The raw template text.
        template: String,
        /// Why it was rejected.
        reason: String,
    },
}
