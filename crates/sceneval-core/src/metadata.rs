//! # Metadata Reader
//!
//! Collects everything the engine needs from a subject in one pass: its
//! shape, compiled rule plan, scenes, message overrides, and serialized
//! value. The whole-object check is kept behind [`Metadata::whole_check`]
//! because it runs after the field rules.
//!
//! ## Loose accessor values
//!
//! Descriptor-driven subjects produce scenes, message overrides, and
//! whole-check results as untyped JSON. The `*_from_value` functions turn
//! those into typed values and reject any other shape with a
//! [`MetadataError`], so a malformed accessor aborts the call before a
//! single rule runs.

use serde_json::Value;

use crate::error::{EngineError, MetadataError};
use crate::plan::RecordPlan;
use crate::scene::{Scene, SceneMap};
use crate::shape::RecordShape;
use crate::subject::{Failures, MessageOverrides, Subject};

/// Metadata read from one subject instance.
#[derive(Debug)]
pub struct Metadata<'s, S: ?Sized> {
    subject: &'s S,
    /// Declared shape, used for alias resolution.
    pub shape: RecordShape,
    /// Compiled rules.
    pub plan: RecordPlan,
    /// Declared scenes.
    pub scenes: SceneMap,
    /// Message overrides by rule kind.
    pub overrides: MessageOverrides,
    /// Serialized instance data.
    pub value: Value,
}

/// Read all metadata from `subject`.
///
/// # Errors
///
/// - [`EngineError::Metadata`] if the shape does not compile or an accessor
///   reports a malformed shape.
/// - [`EngineError::Serialization`] if the subject cannot be serialized.
pub fn read<S: Subject>(subject: &S) -> Result<Metadata<'_, S>, EngineError> {
    let shape = subject.shape();
    let plan = RecordPlan::compile(&shape)?;
    let scenes = subject.scenes()?;
    let overrides = subject.message_overrides()?;
    let value = serde_json::to_value(subject)?;
    Ok(Metadata {
        subject,
        shape,
        plan,
        scenes,
        overrides,
        value,
    })
}

impl<'s, S: Subject> Metadata<'s, S> {
    /// The subject the metadata was read from.
    pub fn subject(&self) -> &'s S {
        self.subject
    }

    /// Run the subject's whole-object check.
    pub fn whole_check(&self, scene: &str) -> Result<Failures, MetadataError> {
        self.subject.whole_check(scene)
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Interpret a loose `scene name -> (list of keys | map of key -> expr)`.
///
/// `null` at the top level or as a scene value means "not declared".
pub fn scenes_from_value(value: &Value) -> Result<SceneMap, MetadataError> {
    let shape_err = |reason: String| MetadataError::SceneShape { reason };
    let entries = match value {
        Value::Null => return Ok(SceneMap::new()),
        Value::Object(entries) => entries,
        other => {
            return Err(shape_err(format!(
                "expected a mapping of scene name to fields, found {}",
                describe(other)
            )))
        }
    };

    let mut scenes = SceneMap::new();
    for (name, fields) in entries {
        let scene = match fields {
            Value::Null => continue,
            Value::Array(items) => {
                let keys = items
                    .iter()
                    .map(|item| {
                        item.as_str().map(str::to_string).ok_or_else(|| {
                            shape_err(format!(
                                "scene '{name}' lists a {} where a field key was expected",
                                describe(item)
                            ))
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Scene::FieldList(keys)
            }
            Value::Object(map) => {
                let pairs = map
                    .iter()
                    .map(|(key, expr)| match expr {
                        Value::String(s) => Ok((key.clone(), s.clone())),
                        Value::Null => Ok((key.clone(), String::new())),
                        other => Err(shape_err(format!(
                            "scene '{name}' maps field '{key}' to a {}, expected a rule expression",
                            describe(other)
                        ))),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Scene::FieldOverrides(pairs.into_iter().collect())
            }
            other => {
                return Err(shape_err(format!(
                    "scene '{name}' must be a list of field keys or a map of field key to rule, found {}",
                    describe(other)
                )))
            }
        };
        scenes.insert(name.clone(), scene);
    }
    Ok(scenes)
}

fn string_map(value: &Value) -> Result<MessageOverrides, String> {
    let entries = match value {
        Value::Null => return Ok(MessageOverrides::new()),
        Value::Object(entries) => entries,
        other => return Err(format!("expected a mapping, found {}", describe(other))),
    };
    entries
        .iter()
        .map(|(k, v)| match v {
            Value::String(s) => Ok((k.clone(), s.clone())),
            other => Err(format!("entry '{k}' is a {}, expected a string", describe(other))),
        })
        .collect()
}

/// Interpret a loose `rule kind -> template` mapping.
pub fn overrides_from_value(value: &Value) -> Result<MessageOverrides, MetadataError> {
    string_map(value).map_err(|reason| MetadataError::MessageShape { reason })
}

/// Interpret a loose `field key -> message` whole-check result.
pub fn failures_from_value(scene: &str, value: &Value) -> Result<Failures, MetadataError> {
    string_map(value).map_err(|reason| MetadataError::WholeCheckShape {
        scene: scene.to_string(),
        reason,
    })
}
