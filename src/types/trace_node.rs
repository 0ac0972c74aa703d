//! Node and edge of a recorded call tree.

use serde::{Deserialize, Serialize};

use super::RunKind;

/// A run registered by the recorder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceNode {
  /// Raw run id as sent by the engine.
  pub id: String,
  /// `"<name>\n(<kind>)"`.
  pub label: String,
  pub kind: RunKind,
}

impl TraceNode {
  pub fn new(id: impl Into<String>, name: &str, kind: RunKind) -> Self {
    Self {
      id: id.into(),
      label: format!("{}\n({})", name, kind),
      kind,
    }
  }
}

/// "`to` was invoked from within `from`".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEdge {
  pub from: String,
  pub to: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub label: Option<String>,
}

impl TraceEdge {
  /// Edge labelled with the child's kind.
  pub fn new(from: impl Into<String>, to: impl Into<String>, kind: RunKind) -> Self {
    Self {
      from: from.into(),
      to: to.into(),
      label: Some(kind.as_str().to_string()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::{TraceEdge, TraceNode};
  use crate::types::RunKind;

  #[test]
  fn node_label_has_name_then_kind_on_second_line() {
    let n = TraceNode::new("run-1", "ChatOpenAI", RunKind::Model);
    assert_eq!(n.label, "ChatOpenAI\n(llm)");
    assert_eq!(n.id, "run-1");
  }

  #[test]
  fn edge_label_is_child_kind() {
    let e = TraceEdge::new("p", "c", RunKind::Retriever);
    assert_eq!(e.label.as_deref(), Some("retriever"));
  }
}
