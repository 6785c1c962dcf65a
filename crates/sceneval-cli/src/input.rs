//! Reading descriptors, documents, and config files from disk.
//!
//! Files ending in `.yaml` or `.yml` are parsed as YAML and converted to
//! JSON values; everything else is parsed as JSON.

use std::path::Path;

use anyhow::{bail, Context, Result};
use sceneval_engine::ValidationOptions;
use serde_json::Value;

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    )
}

/// Load a YAML or JSON file as a JSON value.
pub fn load_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    if is_yaml(path) {
        let yaml: serde_yaml::Value = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing YAML: {}", path.display()))?;
        yaml_to_json_value(&yaml).with_context(|| format!("converting YAML: {}", path.display()))
    } else {
        serde_json::from_str(&content).with_context(|| format!("parsing JSON: {}", path.display()))
    }
}

/// Load validator options; defaults when no file is given.
pub fn load_options(path: Option<&Path>) -> Result<ValidationOptions> {
    let Some(path) = path else {
        return Ok(ValidationOptions::default());
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config: {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(ValidationOptions::default());
    }
    serde_yaml::from_str(&content).with_context(|| format!("parsing config: {}", path.display()))
}

/// Convert a YAML value into a JSON value.
///
/// Map keys must be strings, numbers, or booleans. Tags are dropped and the
/// tagged value converted.
pub fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value> {
    Ok(match yaml {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(*b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else if let Some(f) = n.as_f64() {
                match serde_json::Number::from_f64(f) {
                    Some(num) => Value::Number(num),
                    None => bail!("cannot represent float {f} in JSON"),
                }
            } else {
                bail!("unsupported YAML number: {n:?}")
            }
        }
        serde_yaml::Value::String(s) => Value::String(s.clone()),
        serde_yaml::Value::Sequence(seq) => Value::Array(
            seq.iter()
                .map(yaml_to_json_value)
                .collect::<Result<Vec<_>>>()?,
        ),
        serde_yaml::Value::Mapping(map) => {
            let mut object = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => bail!("unsupported YAML map key: {other:?}"),
                };
                object.insert(key, yaml_to_json_value(v)?);
            }
            Value::Object(object)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value)?,
    })
}
