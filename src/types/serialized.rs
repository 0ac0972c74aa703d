//! Operation descriptor handed to callback handlers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::lenient::text_of;

/// Loosely-structured metadata describing an observed operation.
///
/// Engines send more than this (constructor kwargs, a `type` tag); only the fields used to
/// resolve a display name are kept. Empty strings count as absent.
///
/// Deserialization never fails: a non-object descriptor is empty, a non-string `name` is
/// stringified, and a non-list `id` is dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct Serialized {
  /// Explicit operation name (e.g. a tool's registered name).
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  /// Structured identifier path, most specific component last
  /// (e.g. `["langchain", "chat_models", "openai", "ChatOpenAI"]`).
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub id: Vec<String>,
}

impl From<Value> for Serialized {
  fn from(value: Value) -> Self {
    let Value::Object(map) = value else {
      return Self::default();
    };
    let name = map.get("name").and_then(text_of);
    let id = match map.get("id") {
      Some(Value::Array(parts)) => parts
        .iter()
        .map(|p| text_of(p).unwrap_or_default())
        .collect(),
      _ => Vec::new(),
    };
    Self { name, id }
  }
}

impl Serialized {
  /// Descriptor with only a name.
  pub fn named(name: impl Into<String>) -> Self {
    Self {
      name: Some(name.into()),
      id: Vec::new(),
    }
  }

  /// Descriptor with only an identifier path.
  pub fn with_id<I, S>(id: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      name: None,
      id: id.into_iter().map(Into::into).collect(),
    }
  }

  /// The explicit name, if set and non-empty.
  pub fn name(&self) -> Option<&str> {
    non_empty(self.name.as_deref())
  }

  /// Last component of the identifier path, if non-empty.
  pub fn id_leaf(&self) -> Option<&str> {
    non_empty(self.id.last().map(String::as_str))
  }

  /// Name first, then the identifier leaf, then `default`.
  pub fn name_or_id_leaf<'a>(&'a self, default: &'a str) -> &'a str {
    self.name().or_else(|| self.id_leaf()).unwrap_or(default)
  }

  /// Identifier leaf first, then the name, then `default`.
  pub fn id_leaf_or_name<'a>(&'a self, default: &'a str) -> &'a str {
    self.id_leaf().or_else(|| self.name()).unwrap_or(default)
  }
}

pub(crate) fn non_empty(s: Option<&str>) -> Option<&str> {
  s.filter(|s| !s.is_empty())
}
