//! Kind of an observed run.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of an observed operation.
///
/// The model kind renders as `llm`: that string is the node label suffix, the edge label
/// and the Mermaid style class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunKind {
  #[serde(rename = "llm")]
  Model,
  Chain,
  Tool,
  Retriever,
}

impl RunKind {
  /// Every kind, in diagram style-class order.
  pub const ALL: [RunKind; 4] = [
    RunKind::Model,
    RunKind::Chain,
    RunKind::Tool,
    RunKind::Retriever,
  ];

  /// Name used in labels, edge annotations and style classes.
  pub fn as_str(&self) -> &'static str {
    match self {
      RunKind::Model => "llm",
      RunKind::Chain => "chain",
      RunKind::Tool => "tool",
      RunKind::Retriever => "retriever",
    }
  }
}

impl fmt::Display for RunKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
