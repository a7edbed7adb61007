use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

pub const MANIFEST_FILE_NAME: &str = "package.json";

/// A package.json document: top-level field names mapped to JSON values,
/// kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    fields: Map<String, Value>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn get_mut(&mut self, field: &str) -> Option<&mut Value> {
        self.fields.get_mut(field)
    }

    /// Inserts or replaces `field`. A new field goes to the end.
    pub fn insert(&mut self, field: impl Into<String>, value: Value) {
        self.fields.insert(field.into(), value);
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

impl From<Map<String, Value>> for Manifest {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl TryFrom<Value> for Manifest {
    type Error = anyhow::Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(anyhow::anyhow!(
                "package.json root must be an object, found {}",
                json_kind(&other)
            )),
        }
    }
}

pub fn manifest_path(folder: &Path) -> PathBuf {
    folder.join(MANIFEST_FILE_NAME)
}

/// Reads `<folder>/package.json`, whose root must be a JSON object.
///
/// Each step names the file in its error context. The underlying I/O or
/// JSON error stays in the source chain unchanged.
pub fn read_manifest(folder: &Path) -> Result<Manifest> {
    let path = manifest_path(folder);

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read manifest from {}", path.display()))?;

    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse manifest JSON from {}", path.display()))?;

    Manifest::try_from(value)
        .with_context(|| format!("Invalid manifest in {}", path.display()))
}

/// Writes `manifest` as pretty JSON to `<folder>/package.json`.
///
/// The folder must already exist. Serialization happens before the file is
/// opened, so a failure leaves no partial output behind.
pub fn write_manifest(folder: &Path, manifest: &Manifest) -> Result<PathBuf> {
    let path = manifest_path(folder);

    let mut json = serde_json::to_string_pretty(manifest)
        .context("Failed to serialize manifest to JSON")?;
    json.push('\n');

    fs::write(&path, json)
        .with_context(|| format!("Failed to write manifest to {}", path.display()))?;

    Ok(path)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
