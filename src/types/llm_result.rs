//! Output of a model run.

use serde::{Deserialize, Serialize};

/// One generated candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Generation {
  pub text: String,
}

/// Token accounting reported by the model provider. Provider-specific counters (cached or
/// reasoning tokens, ...) are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenUsage {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub prompt_tokens: Option<u64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub completion_tokens: Option<u64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub total_tokens: Option<u64>,
  #[serde(flatten)]
  pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Provider-specific output metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmOutput {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub token_usage: Option<TokenUsage>,
  /// Everything else the provider reported.
  #[serde(flatten)]
  pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Result of a model run: one generation list per prompt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmResult {
  #[serde(default)]
  pub generations: Vec<Vec<Generation>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub llm_output: Option<LlmOutput>,
}

impl LlmResult {
  /// Token usage, if the provider reported any.
  pub fn token_usage(&self) -> Option<&TokenUsage> {
    self.llm_output.as_ref()?.token_usage.as_ref()
  }
}
