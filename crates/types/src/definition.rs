//! Rubric definition files and form snapshots.
//!
//! A definition file lists the rows to preload into a page, in order. Both
//! JSON and YAML are accepted; the format is chosen from the file extension.
//! A [`FormSnapshot`] is the flattened field id → value view of a page, the
//! same data a submitted form would carry.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::ElementId;
use crate::rubric::Presentation;
use crate::value_map::{Score, ValueMap};

/// Error surfaced when a definition file cannot be loaded.
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("failed to read definition file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON definition: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid YAML definition: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unsupported definition file extension '{0}'; expected .json, .yaml or .yml")]
    UnsupportedExtension(String),
}

/// A single row to preload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RubricDefinition {
    pub presentation: Presentation,
    /// Criterion name written into the row's name input.
    #[serde(default)]
    pub name: String,
    /// Value map for dropdown rows, in authoring order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<ValueMap>,
    /// Maximum score for numeric rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_score: Option<Score>,
    /// Score awarded by checkbox rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<Score>,
}

/// Top-level shape of a definition file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RubricDefinitionFile {
    #[serde(default)]
    pub rubrics: Vec<RubricDefinition>,
}

impl RubricDefinitionFile {
    pub fn from_json_str(input: &str) -> Result<Self, DefinitionError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn from_yaml_str(input: &str) -> Result<Self, DefinitionError> {
        Ok(serde_yaml::from_str(input)?)
    }

    /// Loads a definition file, dispatching on its extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DefinitionError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|extension| extension.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "json" => Self::from_json_str(&fs::read_to_string(path)?),
            "yaml" | "yml" => Self::from_yaml_str(&fs::read_to_string(path)?),
            other => Err(DefinitionError::UnsupportedExtension(other.to_string())),
        }
    }
}

/// Field id → value pairs in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormSnapshot {
    fields: IndexMap<ElementId, String>,
}

impl FormSnapshot {
    pub fn insert(&mut self, id: ElementId, value: impl Into<String>) {
        self.fields.insert(id, value.into());
    }

    pub fn get(&self, id: &ElementId) -> Option<&str> {
        self.fields.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ElementId, &str)> {
        self.fields.iter().map(|(id, value)| (id, value.as_str()))
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const YAML: &str = r#"
rubrics:
  - presentation: DROPDOWN
    name: Clarity
    values:
      excellent: 4
      adequate: 2
      missing: 0
  - presentation: NUMERIC
    name: Correctness
    max_score: 10
  - presentation: CHECKBOX
    name: Submitted on time
    score: "1"
"#;

    #[test]
    fn parses_yaml_definitions_in_order() {
        let file = RubricDefinitionFile::from_yaml_str(YAML).expect("yaml");
        let kinds: Vec<_> = file.rubrics.iter().map(|rubric| rubric.presentation).collect();
        assert_eq!(kinds, vec![Presentation::Dropdown, Presentation::Numeric, Presentation::Checkbox]);

        let values = file.rubrics[0].values.as_ref().expect("dropdown values");
        assert_eq!(values.serialized_form(), "excellent:4,adequate:2,missing:0");
        assert_eq!(file.rubrics[1].max_score.as_ref().map(Score::as_str), Some("10"));
    }

    #[test]
    fn yaml_scores_are_kept_as_written() {
        let yaml = "rubrics:\n  - presentation: DROPDOWN\n    values:\n      full: 10.0\n      half: 2.50\n  - presentation: NUMERIC\n    max_score: 10.0\n";
        let file = RubricDefinitionFile::from_yaml_str(yaml).expect("yaml");

        let values = file.rubrics[0].values.as_ref().expect("dropdown values");
        assert_eq!(values.serialized_form(), "full:10.0,half:2.50");
        assert_eq!(file.rubrics[1].max_score.as_ref().map(Score::as_str), Some("10.0"));
    }

    #[test]
    fn json_numeric_scores_are_rejected() {
        let error = RubricDefinitionFile::from_json_str(r#"{"rubrics":[{"presentation":"CHECKBOX","score":2.50}]}"#)
            .unwrap_err();
        assert!(matches!(error, DefinitionError::Json(_)));
    }

    #[test]
    fn load_dispatches_on_extension() {
        let mut json_file = tempfile::Builder::new().suffix(".json").tempfile().expect("tempfile");
        write!(json_file, r#"{{"rubrics": [{{"presentation": "CHECKBOX", "name": "Tests pass"}}]}}"#).expect("write");
        let file = RubricDefinitionFile::load(json_file.path()).expect("load json");
        assert_eq!(file.rubrics[0].name, "Tests pass");

        let txt_file = tempfile::Builder::new().suffix(".txt").tempfile().expect("tempfile");
        let error = RubricDefinitionFile::load(txt_file.path()).unwrap_err();
        assert!(matches!(error, DefinitionError::UnsupportedExtension(ext) if ext == "txt"));
    }

    #[test]
    fn snapshot_serializes_as_flat_object() {
        let mut snapshot = FormSnapshot::default();
        snapshot.insert(ElementId::new("rubric-1-hidden"), "a:1");
        let json = serde_json::to_string(&snapshot).expect("json");
        assert_eq!(json, r#"{"rubric-1-hidden":"a:1"}"#);
    }
}
