//! Callback handler seam between an execution engine and its observers.

use serde_json::Value;

use crate::types::{ChatMessage, LlmResult, RunError, RunInfo, Serialized};

/// Passive observer of run lifecycle events.
///
/// Every method is a fire-and-forget notification with a no-op default, so an observer only
/// implements the events it cares about. Methods take `&self` and must not block: engines call
/// them inline from concurrently running operations.
pub trait CallbackHandler: Send + Sync {
  /// Handler name, for diagnostics.
  fn name(&self) -> &str;

  /// A text-completion model run started.
  fn on_llm_start(&self, _llm: &Serialized, _prompts: &[String], _run: &RunInfo) {}

  /// A chat model run started.
  fn on_chat_model_start(
    &self,
    _llm: &Serialized,
    _messages: &[Vec<ChatMessage>],
    _run: &RunInfo,
  ) {
  }

  fn on_llm_end(&self, _output: &LlmResult, _run_id: &str) {}

  fn on_llm_error(&self, _error: &RunError, _run_id: &str) {}

  fn on_chain_start(&self, _chain: &Serialized, _inputs: &Value, _run: &RunInfo) {}

  fn on_chain_end(&self, _outputs: &Value, _run_id: &str) {}

  fn on_chain_error(&self, _error: &RunError, _run_id: &str) {}

  fn on_tool_start(&self, _tool: &Serialized, _input: &str, _run: &RunInfo) {}

  fn on_tool_end(&self, _output: &Value, _run_id: &str) {}

  fn on_tool_error(&self, _error: &RunError, _run_id: &str) {}

  fn on_retriever_start(&self, _retriever: &Serialized, _query: &str, _run: &RunInfo) {}

  fn on_retriever_end(&self, _documents: &[Value], _run_id: &str) {}

  fn on_retriever_error(&self, _error: &RunError, _run_id: &str) {}
}
