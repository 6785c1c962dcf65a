//! # Descriptor-Driven Subjects
//!
//! [`DocumentSubject`] validates an untyped JSON document against a record
//! descriptor instead of a Rust type. The descriptor carries the same
//! metadata a typed subject declares in code:
//!
//! ```yaml
//! record: Example
//! fields:
//!   - key: title
//!     rules: required
//!     alias: 标题
//!   - key: works
//!     rules: gt=0,dive,required
//!     list:
//!       record:
//!         name: Work
//!         fields:
//!           - { key: code, rules: required, alias: 代码 }
//! scenes:
//!   create: [title, works]
//! messages:
//!   required: "{0}是必须的"
//! whole_check:
//!   delete:
//!     id: 已发布的记录不能删除
//! ```
//!
//! `whole_check` maps a scene name to the fixed failures reported whenever
//! the document is validated in that scene.
//!
//! `scenes`, `messages`, and `whole_check` are kept loose and checked by the
//! metadata reader on every call, so a descriptor with a wrongly shaped
//! section fails the call with a metadata error rather than at load time.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::error::MetadataError;
use crate::metadata::{failures_from_value, overrides_from_value, scenes_from_value};
use crate::scene::SceneMap;
use crate::shape::{FieldKind, FieldShape, RecordShape};
use crate::subject::{Failures, MessageOverrides, Subject};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SubjectDescriptor {
    record: String,
    #[serde(default)]
    fields: Vec<FieldDescriptor>,
    #[serde(default)]
    scenes: Value,
    #[serde(default)]
    messages: Value,
    #[serde(default)]
    whole_check: Value,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RecordDescriptor {
    name: String,
    #[serde(default)]
    fields: Vec<FieldDescriptor>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldDescriptor {
    key: String,
    #[serde(default)]
    rules: String,
    #[serde(default)]
    alias: Option<String>,
    #[serde(default)]
    ignore: bool,
    #[serde(default)]
    record: Option<RecordDescriptor>,
    #[serde(default)]
    list: Option<ElementDescriptor>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ElementDescriptor {
    #[serde(default)]
    record: Option<RecordDescriptor>,
    #[serde(default)]
    list: Option<Box<ElementDescriptor>>,
}

fn record_shape(name: &str, fields: &[FieldDescriptor]) -> Result<RecordShape, MetadataError> {
    fields.iter().try_fold(RecordShape::new(name), |shape, f| {
        Ok(shape.field(field_shape(f)?))
    })
}

fn field_shape(desc: &FieldDescriptor) -> Result<FieldShape, MetadataError> {
    let kind = match (&desc.record, &desc.list) {
        (Some(_), Some(_)) => {
            return Err(MetadataError::Descriptor(format!(
                "field '{}' declares both 'record' and 'list'",
                desc.key
            )))
        }
        (Some(r), None) => FieldKind::Record(record_shape(&r.name, &r.fields)?),
        (None, Some(elem)) => FieldKind::List(Box::new(element_kind(elem)?)),
        (None, None) => FieldKind::Value,
    };
    let mut field = FieldShape::with_kind(desc.key.clone(), kind).rules(desc.rules.clone());
    if let Some(alias) = &desc.alias {
        field = field.alias(alias);
    }
    if desc.ignore {
        field = field.ignored();
    }
    Ok(field)
}

fn element_kind(desc: &ElementDescriptor) -> Result<FieldKind, MetadataError> {
    match (&desc.record, &desc.list) {
        (Some(_), Some(_)) => Err(MetadataError::Descriptor(
            "list element declares both 'record' and 'list'".to_string(),
        )),
        (Some(r), None) => Ok(FieldKind::Record(record_shape(&r.name, &r.fields)?)),
        (None, Some(inner)) => Ok(FieldKind::List(Box::new(element_kind(inner)?))),
        (None, None) => Ok(FieldKind::Value),
    }
}

/// A JSON document paired with a record descriptor.
#[derive(Debug, Clone)]
pub struct DocumentSubject {
    shape: RecordShape,
    scenes: Value,
    messages: Value,
    whole_check: Value,
    document: Value,
}

impl DocumentSubject {
    /// Build a subject from a descriptor value and the document to validate.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::Descriptor`] if the descriptor's record or
    /// field declarations cannot be read.
    pub fn new(descriptor: &Value, document: Value) -> Result<Self, MetadataError> {
        let desc: SubjectDescriptor = serde_json::from_value(descriptor.clone())
            .map_err(|e| MetadataError::Descriptor(e.to_string()))?;
        Ok(Self {
            shape: record_shape(&desc.record, &desc.fields)?,
            scenes: desc.scenes,
            messages: desc.messages,
            whole_check: desc.whole_check,
            document,
        })
    }

    /// The document being validated.
    pub fn document(&self) -> &Value {
        &self.document
    }
}

impl Serialize for DocumentSubject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.document.serialize(serializer)
    }
}

impl Subject for DocumentSubject {
    fn shape(&self) -> RecordShape {
        self.shape.clone()
    }

    fn type_key(&self) -> String {
        format!("document:{}", self.shape.name)
    }

    fn scenes(&self) -> Result<SceneMap, MetadataError> {
        scenes_from_value(&self.scenes)
    }

    fn message_overrides(&self) -> Result<MessageOverrides, MetadataError> {
        overrides_from_value(&self.messages)
    }

    fn whole_check(&self, scene: &str) -> Result<Failures, MetadataError> {
        match &self.whole_check {
            Value::Object(by_scene) => {
                failures_from_value(scene, by_scene.get(scene).unwrap_or(&Value::Null))
            }
            other => failures_from_value(scene, other),
        }
    }
}
