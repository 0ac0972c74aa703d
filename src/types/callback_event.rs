//! Lifecycle notifications as data: one variant per callback handler method.
//!
//! Events serialize to one JSON object per notification, tagged by `"event"`, with the run
//! envelope flattened in for start events:
//!
//! ```json
//! {"event":"tool_start","tool":{"name":"search"},"input":"Matrix","run_id":"t1","parent_run_id":"c1"}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::lenient::null_as_default;
use super::{ChatMessage, LlmResult, RunError, RunInfo, RunKind, Serialized};
use crate::handler::CallbackHandler;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CallbackEvent {
  LlmStart {
    #[serde(default)]
    llm: Serialized,
    #[serde(default, deserialize_with = "null_as_default")]
    prompts: Vec<String>,
    #[serde(flatten)]
    run: RunInfo,
  },
  ChatModelStart {
    #[serde(default)]
    llm: Serialized,
    #[serde(default, deserialize_with = "null_as_default")]
    messages: Vec<Vec<ChatMessage>>,
    #[serde(flatten)]
    run: RunInfo,
  },
  LlmEnd {
    #[serde(default, deserialize_with = "null_as_default")]
    output: LlmResult,
    run_id: String,
  },
  LlmError {
    error: RunError,
    run_id: String,
  },
  ChainStart {
    #[serde(default)]
    chain: Serialized,
    #[serde(default)]
    inputs: Value,
    #[serde(flatten)]
    run: RunInfo,
  },
  ChainEnd {
    #[serde(default)]
    outputs: Value,
    run_id: String,
  },
  ChainError {
    error: RunError,
    run_id: String,
  },
  ToolStart {
    #[serde(default)]
    tool: Serialized,
    #[serde(default, deserialize_with = "null_as_default")]
    input: String,
    #[serde(flatten)]
    run: RunInfo,
  },
  ToolEnd {
    #[serde(default)]
    output: Value,
    run_id: String,
  },
  ToolError {
    error: RunError,
    run_id: String,
  },
  RetrieverStart {
    #[serde(default)]
    retriever: Serialized,
    #[serde(default, deserialize_with = "null_as_default")]
    query: String,
    #[serde(flatten)]
    run: RunInfo,
  },
  RetrieverEnd {
    #[serde(default, deserialize_with = "null_as_default")]
    documents: Vec<Value>,
    run_id: String,
  },
  RetrieverError {
    error: RunError,
    run_id: String,
  },
}

impl CallbackEvent {
  /// Id of the run this event belongs to.
  pub fn run_id(&self) -> &str {
    match self {
      CallbackEvent::LlmStart { run, .. }
      | CallbackEvent::ChatModelStart { run, .. }
      | CallbackEvent::ChainStart { run, .. }
      | CallbackEvent::ToolStart { run, .. }
      | CallbackEvent::RetrieverStart { run, .. } => &run.run_id,
      CallbackEvent::LlmEnd { run_id, .. }
      | CallbackEvent::LlmError { run_id, .. }
      | CallbackEvent::ChainEnd { run_id, .. }
      | CallbackEvent::ChainError { run_id, .. }
      | CallbackEvent::ToolEnd { run_id, .. }
      | CallbackEvent::ToolError { run_id, .. }
      | CallbackEvent::RetrieverEnd { run_id, .. }
      | CallbackEvent::RetrieverError { run_id, .. } => run_id,
    }
  }

  /// Run envelope; only start events carry one.
  pub fn run_info(&self) -> Option<&RunInfo> {
    match self {
      CallbackEvent::LlmStart { run, .. }
      | CallbackEvent::ChatModelStart { run, .. }
      | CallbackEvent::ChainStart { run, .. }
      | CallbackEvent::ToolStart { run, .. }
      | CallbackEvent::RetrieverStart { run, .. } => Some(run),
      _ => None,
    }
  }

  /// Parent run id of a start event.
  pub fn parent_run_id(&self) -> Option<&str> {
    self.run_info().and_then(RunInfo::parent)
  }

  pub fn kind(&self) -> RunKind {
    match self {
      CallbackEvent::LlmStart { .. }
      | CallbackEvent::ChatModelStart { .. }
      | CallbackEvent::LlmEnd { .. }
      | CallbackEvent::LlmError { .. } => RunKind::Model,
      CallbackEvent::ChainStart { .. }
      | CallbackEvent::ChainEnd { .. }
      | CallbackEvent::ChainError { .. } => RunKind::Chain,
      CallbackEvent::ToolStart { .. }
      | CallbackEvent::ToolEnd { .. }
      | CallbackEvent::ToolError { .. } => RunKind::Tool,
      CallbackEvent::RetrieverStart { .. }
      | CallbackEvent::RetrieverEnd { .. }
      | CallbackEvent::RetrieverError { .. } => RunKind::Retriever,
    }
  }

  /// Calls the handler method matching this event.
  pub fn dispatch(&self, handler: &dyn CallbackHandler) {
    match self {
      CallbackEvent::LlmStart { llm, prompts, run } => handler.on_llm_start(llm, prompts, run),
      CallbackEvent::ChatModelStart { llm, messages, run } => {
        handler.on_chat_model_start(llm, messages, run)
      }
      CallbackEvent::LlmEnd { output, run_id } => handler.on_llm_end(output, run_id),
      CallbackEvent::LlmError { error, run_id } => handler.on_llm_error(error, run_id),
      CallbackEvent::ChainStart { chain, inputs, run } => {
        handler.on_chain_start(chain, inputs, run)
      }
      CallbackEvent::ChainEnd { outputs, run_id } => handler.on_chain_end(outputs, run_id),
      CallbackEvent::ChainError { error, run_id } => handler.on_chain_error(error, run_id),
      CallbackEvent::ToolStart { tool, input, run } => handler.on_tool_start(tool, input, run),
      CallbackEvent::ToolEnd { output, run_id } => handler.on_tool_end(output, run_id),
      CallbackEvent::ToolError { error, run_id } => handler.on_tool_error(error, run_id),
      CallbackEvent::RetrieverStart {
        retriever,
        query,
        run,
      } => handler.on_retriever_start(retriever, query, run),
      CallbackEvent::RetrieverEnd { documents, run_id } => {
        handler.on_retriever_end(documents, run_id)
      }
      CallbackEvent::RetrieverError { error, run_id } => {
        handler.on_retriever_error(error, run_id)
      }
    }
  }
}
