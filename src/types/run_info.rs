//! Per-event run envelope.

use serde::{Deserialize, Serialize};

use super::serialized::non_empty;

/// Identity and metadata of the run a start event belongs to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunInfo {
  pub run_id: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub parent_run_id: Option<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub tags: Vec<String>,
  #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
  pub metadata: serde_json::Map<String, serde_json::Value>,
  /// Explicit run-name override set by the caller.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub run_name: Option<String>,
}

impl RunInfo {
  /// Root run (no parent).
  pub fn root(run_id: impl Into<String>) -> Self {
    Self {
      run_id: run_id.into(),
      ..Self::default()
    }
  }

  /// Run nested inside `parent_run_id`.
  pub fn child(run_id: impl Into<String>, parent_run_id: impl Into<String>) -> Self {
    Self {
      run_id: run_id.into(),
      parent_run_id: Some(parent_run_id.into()),
      ..Self::default()
    }
  }

  pub fn with_run_name(mut self, run_name: impl Into<String>) -> Self {
    self.run_name = Some(run_name.into());
    self
  }

  /// Parent id, treating an empty string as no parent.
  pub fn parent(&self) -> Option<&str> {
    non_empty(self.parent_run_id.as_deref())
  }

  pub fn run_name(&self) -> Option<&str> {
    non_empty(self.run_name.as_deref())
  }
}
