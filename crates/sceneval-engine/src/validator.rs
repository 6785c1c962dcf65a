//! # Validation Orchestrator
//!
//! [`Validator::validate`] runs one validation pass:
//!
//! 1. read the subject's metadata;
//! 2. bind its custom rules and build the translator;
//! 3. resolve the scene;
//! 4. execute the selected rules;
//! 5. render, humanize, and key every rule failure;
//! 6. merge the whole-object check without overwriting rule failures;
//! 7. return [`Outcome::Pass`] or [`Outcome::Fail`].
//!
//! Metadata and setup problems abort with an [`EngineError`] before any
//! failure mapping exists.

use std::collections::{BTreeMap, BTreeSet};

use sceneval_core::metadata;
use sceneval_core::scene::resolve;
use sceneval_core::{
    EngineError, Failures, FieldPath, RecordShape, ResolvedScene, Selection, Subject,
};
use sceneval_i18n::{MessageArgs, Translator};
use sceneval_rules::{execute, RuleFailure, RuleRegistry};

use crate::alias::{humanize, resolve_aliases};
use crate::options::{KeyStyle, ValidationOptions};

static NO_FAILURES: Failures = BTreeMap::new();

/// Result of a validation pass that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing failed.
    Pass,
    /// Failure key → message. Never empty.
    Fail(Failures),
}

impl Outcome {
    fn from_failures(failures: Failures) -> Self {
        if failures.is_empty() {
            Outcome::Pass
        } else {
            Outcome::Fail(failures)
        }
    }

    /// True for [`Outcome::Pass`].
    pub fn passed(&self) -> bool {
        matches!(self, Outcome::Pass)
    }

    /// The failures, empty on pass.
    pub fn failures(&self) -> &Failures {
        match self {
            Outcome::Pass => &NO_FAILURES,
            Outcome::Fail(failures) => failures,
        }
    }

    /// `(passed, failures)`.
    pub fn into_parts(self) -> (bool, Failures) {
        match self {
            Outcome::Pass => (true, Failures::new()),
            Outcome::Fail(failures) => (false, failures),
        }
    }
}

/// Validates subjects. Shareable across threads; custom-rule bindings are
/// cached per subject type for the validator's lifetime.
#[derive(Debug, Default)]
pub struct Validator {
    registry: RuleRegistry,
    options: ValidationOptions,
}

impl Validator {
    /// A validator with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// A validator with the given options.
    pub fn with_options(options: ValidationOptions) -> Self {
        Self {
            registry: RuleRegistry::new(),
            options,
        }
    }

    /// Current options.
    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    /// The rule registry.
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Validate `subject` in `scene` (empty for full validation), rendering
    /// messages in `locale` (`None` or empty for the configured default).
    ///
    /// # Errors
    ///
    /// - [`EngineError::Metadata`] for malformed subject metadata, an
    ///   undefined rule kind, or a malformed whole-object check result.
    /// - [`EngineError::Setup`] for an unsupported locale or a message
    ///   override that does not parse.
    /// - [`EngineError::Serialization`] if the subject cannot be serialized.
    pub fn validate<S: Subject>(
        &self,
        subject: &S,
        scene: &str,
        locale: Option<&str>,
    ) -> Result<Outcome, EngineError> {
        let meta = metadata::read(subject)?;

        let table = self.registry.bind(subject);
        table.ensure_known(&meta.plan)?;
        let translator = self.translator(locale)?.with_overrides(&meta.overrides)?;

        let resolved = resolve(&meta.scenes, scene);
        report_scene(&meta.shape, scene, &resolved);

        let rule_failures = if resolved.selection.is_empty() {
            Vec::new()
        } else {
            execute(&meta.plan, &meta.value, &table, &resolved.selection)
        };
        tracing::debug!(
            record = %meta.plan.name,
            count = rule_failures.len(),
            "rule failures"
        );

        let mut failures = Failures::new();
        let mut failed_paths = BTreeSet::new();
        for failure in &rule_failures {
            let (key, message) = self.describe(&meta.shape, &translator, failure);
            failed_paths.insert(failure.path.relative());
            failures.entry(key).or_insert(message);
        }

        let whole = meta.whole_check(scene)?;
        tracing::debug!(count = whole.len(), "whole-object failures");
        for (key, message) in whole {
            if failed_paths.contains(&key) {
                continue;
            }
            let key = self.whole_check_key(&meta.shape, key);
            failures.entry(key).or_insert(message);
        }

        Ok(Outcome::from_failures(failures))
    }

    fn translator(&self, locale: Option<&str>) -> Result<Translator, EngineError> {
        let fallback = self.options.fallback_locale;
        let translator = match locale.map(str::trim).filter(|code| !code.is_empty()) {
            Some(code) => Translator::for_code(code, fallback)?,
            None => Translator::new(self.options.default_locale, fallback)?,
        };
        Ok(translator)
    }

    /// Key a whole-check entry the way a rule failure on the same field
    /// would be keyed. Keys naming no declared field are kept as given.
    fn whole_check_key(&self, shape: &RecordShape, key: String) -> String {
        if self.options.key_style == KeyStyle::Path {
            return key;
        }
        let Some(path) = FieldPath::parse(&format!("{}.{key}", shape.name)) else {
            return key;
        };
        let aliases = resolve_aliases(shape, &path);
        match aliases.default_alias() {
            Some(label) => path.relative_with_terminal(label),
            None => key,
        }
    }

    fn describe(
        &self,
        shape: &RecordShape,
        translator: &Translator,
        failure: &RuleFailure,
    ) -> (String, String) {
        let aliases = resolve_aliases(shape, &failure.path);
        let internal = failure
            .path
            .terminal()
            .map_or(failure.path.record(), |s| s.key.as_str());
        let label = aliases.for_rule(&failure.kind).unwrap_or(internal);

        let rendered = translator.render(&MessageArgs {
            kind: &failure.kind,
            variant: failure.class.suffix(),
            label,
            param: failure.param.as_deref(),
            path: &failure.path,
        });
        let message = humanize(&rendered, internal, label);

        let key = match self.options.key_style {
            KeyStyle::Path => failure.path.relative(),
            KeyStyle::Alias => failure.path.relative_with_terminal(label),
        };
        (key, message)
    }
}

fn report_scene(shape: &RecordShape, scene: &str, resolved: &ResolvedScene) {
    let Selection::Only(keys) = &resolved.selection else {
        tracing::debug!(scene, "full validation");
        return;
    };
    tracing::debug!(scene, fields = keys.len(), "partial validation");
    if !resolved.unapplied_overrides.is_empty() {
        let fields: Vec<&str> = resolved
            .unapplied_overrides
            .iter()
            .map(|(key, _)| key.as_str())
            .collect();
        tracing::warn!(
            scene,
            fields = ?fields,
            "scene rule overrides are not supported; declared rules apply"
        );
    }
    for key in keys {
        if shape.lookup(key).is_none() {
            tracing::warn!(scene, field = %key, "scene selects an undeclared field");
        }
    }
}
