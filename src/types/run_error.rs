//! Failure reported by an observed operation.

use serde::{Deserialize, Serialize};

/// Error carried by `*_error` callback events. Displays as the message only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct RunError {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  pub message: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub stack: Option<String>,
}

impl RunError {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      name: None,
      message: message.into(),
      stack: None,
    }
  }
}
