//! # Scenes and Scene Resolution
//!
//! A scene names a usage context ("create", "update", "delete") and selects
//! which fields are validated in it. A scene is either an ordered list of
//! field keys or a map of field key to override rule expression.
//!
//! ## Override expressions are not applied
//!
//! Override expressions in [`Scene::FieldOverrides`] are accepted, but only
//! their keys drive selection; each field keeps its declared rules. The
//! resolver reports every non-empty override in
//! [`ResolvedScene::unapplied_overrides`] so callers can surface it. An empty
//! override expression means "keep the declared rules" and is not reported.

use std::collections::{BTreeMap, BTreeSet};

/// Field selection of one scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scene {
    /// Validate these fields with their declared rules.
    FieldList(Vec<String>),
    /// Validate these fields; the override expressions are not applied.
    FieldOverrides(BTreeMap<String, String>),
}

impl Scene {
    /// Build a list scene from anything iterable of keys.
    pub fn fields<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Scene::FieldList(keys.into_iter().map(Into::into).collect())
    }

    /// Build an override scene from `(key, expression)` pairs.
    pub fn overrides<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Scene::FieldOverrides(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// The selected keys, in declaration order for lists and key order for
    /// maps, duplicates removed.
    pub fn keys(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        let iter: Box<dyn Iterator<Item = &String>> = match self {
            Scene::FieldList(keys) => Box::new(keys.iter()),
            Scene::FieldOverrides(map) => Box::new(map.keys()),
        };
        iter.filter(|k| seen.insert(k.as_str()))
            .map(String::as_str)
            .collect()
    }
}

/// All scenes a subject declares, by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SceneMap {
    scenes: BTreeMap<String, Scene>,
}

impl SceneMap {
    /// An empty scene map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a scene.
    pub fn scene(mut self, name: impl Into<String>, scene: Scene) -> Self {
        self.scenes.insert(name.into(), scene);
        self
    }

    /// Add or replace a scene in place.
    pub fn insert(&mut self, name: impl Into<String>, scene: Scene) {
        self.scenes.insert(name.into(), scene);
    }

    /// Look up a scene.
    pub fn get(&self, name: &str) -> Option<&Scene> {
        self.scenes.get(name)
    }

    /// Iterate scenes in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scene)> {
        self.scenes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of declared scenes.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// True when no scene is declared.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}

/// Which fields a validation pass covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Every declared field.
    All,
    /// Only these dotted key paths and their subtrees.
    Only(BTreeSet<String>),
}

/// How the executor treats one field under a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Run the field's rules and descend into it.
    Full,
    /// Do not run the field's rules, but descend: a selected key lies below.
    Descend,
    /// Leave the field and its subtree alone.
    Skip,
}

impl Selection {
    /// Decide how to treat the field at `key_path` (dotted, no indices).
    pub fn visit(&self, key_path: &str) -> Visit {
        let keys = match self {
            Selection::All => return Visit::Full,
            Selection::Only(keys) => keys,
        };
        let covered = keys.iter().any(|k| {
            k == key_path
                || key_path
                    .strip_prefix(k.as_str())
                    .is_some_and(|rest| rest.starts_with('.'))
        });
        if covered {
            return Visit::Full;
        }
        let below = keys.iter().any(|k| {
            k.strip_prefix(key_path)
                .is_some_and(|rest| rest.starts_with('.'))
        });
        if below {
            Visit::Descend
        } else {
            Visit::Skip
        }
    }

    /// True for a partial selection with no keys.
    pub fn is_empty(&self) -> bool {
        matches!(self, Selection::Only(keys) if keys.is_empty())
    }
}

/// Result of resolving a scene name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedScene {
    /// Fields to validate.
    pub selection: Selection,
    /// Non-empty override expressions that were accepted but not applied,
    /// as `(field key, expression)`.
    pub unapplied_overrides: Vec<(String, String)>,
}

impl ResolvedScene {
    /// Full validation.
    pub fn full() -> Self {
        Self {
            selection: Selection::All,
            unapplied_overrides: Vec::new(),
        }
    }

    /// True when only a subset of fields is validated.
    pub fn is_partial(&self) -> bool {
        matches!(self.selection, Selection::Only(_))
    }
}

/// Resolve `name` against the declared scenes.
///
/// An empty name, or a name with no scene, means full validation.
pub fn resolve(scenes: &SceneMap, name: &str) -> ResolvedScene {
    if name.is_empty() {
        return ResolvedScene::full();
    }
    let Some(scene) = scenes.get(name) else {
        return ResolvedScene::full();
    };
    let keys: BTreeSet<String> = scene.keys().into_iter().map(str::to_string).collect();
    let unapplied_overrides = match scene {
        Scene::FieldList(_) => Vec::new(),
        Scene::FieldOverrides(map) => map
            .iter()
            .filter(|(_, expr)| !expr.trim().is_empty())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
    };
    ResolvedScene {
        selection: Selection::Only(keys),
        unapplied_overrides,
    }
}
