//! Forgiving deserializers for engine payloads.
//!
//! Engines are loose about optional fields: `null` where a list or object is expected, numbers
//! where a name is expected. None of that should fail an event.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Missing or `null` becomes `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Default + Deserialize<'de>,
{
  Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Strings as-is; `null` as absent; anything else as its JSON text.
pub(crate) fn text_of(value: &Value) -> Option<String> {
  match value {
    Value::Null => None,
    Value::String(s) => Some(s.clone()),
    other => Some(other.to_string()),
  }
}

#[cfg(test)]
mod tests {
  use serde::Deserialize;
  use serde_json::json;

  use super::{null_as_default, text_of};

  #[derive(Deserialize)]
  struct Holder {
    #[serde(default, deserialize_with = "null_as_default")]
    items: Vec<String>,
  }

  #[test]
  fn null_and_missing_become_default() {
    let h: Holder = serde_json::from_str(r#"{"items": null}"#).unwrap();
    assert!(h.items.is_empty());
    let h: Holder = serde_json::from_str("{}").unwrap();
    assert!(h.items.is_empty());
    let h: Holder = serde_json::from_str(r#"{"items": ["a"]}"#).unwrap();
    assert_eq!(h.items, vec!["a"]);
  }

  #[test]
  fn text_of_stringifies_scalars() {
    assert_eq!(text_of(&json!("search")), Some("search".to_string()));
    assert_eq!(text_of(&json!(42)), Some("42".to_string()));
    assert_eq!(text_of(&json!(true)), Some("true".to_string()));
    assert_eq!(text_of(&json!(null)), None);
  }
}
