//! Chat message passed to chat-model runs.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
  /// Speaker role (e.g. "system", "human", "ai").
  pub role: String,
  pub content: String,
}

impl ChatMessage {
  pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
    Self {
      role: role.into(),
      content: content.into(),
    }
  }

  /// Speaker prefix used in transcripts: `System`, `Human`, `AI`, otherwise the role with its
  /// first letter upper-cased.
  pub fn speaker(&self) -> String {
    match self.role.as_str() {
      "system" => "System".to_string(),
      "human" => "Human".to_string(),
      "ai" => "AI".to_string(),
      other => {
        let mut chars = other.chars();
        match chars.next() {
          Some(first) => first.to_uppercase().chain(chars).collect(),
          None => String::new(),
        }
      }
    }
  }
}

/// `"<Speaker>: <content>"` per message, joined by newlines.
pub fn buffer_string(messages: &[ChatMessage]) -> String {
  messages
    .iter()
    .map(|m| format!("{}: {}", m.speaker(), m.content))
    .collect::<Vec<_>>()
    .join("\n")
}
