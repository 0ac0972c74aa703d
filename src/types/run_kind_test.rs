//! Tests for `RunKind`.

use super::RunKind;

#[test]
fn model_renders_as_llm() {
  assert_eq!(RunKind::Model.as_str(), "llm");
  assert_eq!(RunKind::Model.to_string(), "llm");
}

#[test]
fn display_matches_as_str() {
  for kind in RunKind::ALL {
    assert_eq!(kind.to_string(), kind.as_str());
  }
}

#[test]
fn serializes_to_style_class_name() {
  let json = serde_json::to_string(&RunKind::Model).unwrap();
  assert_eq!(json, "\"llm\"");
  let json = serde_json::to_string(&RunKind::Retriever).unwrap();
  assert_eq!(json, "\"retriever\"");
  let back: RunKind = serde_json::from_str("\"tool\"").unwrap();
  assert_eq!(back, RunKind::Tool);
}
