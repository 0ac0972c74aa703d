//! Callback payloads and recorded call-tree types.
//!
//! Payload types mirror what an agent-execution engine hands to its callback handlers; trace
//! types are what the recorder keeps.

mod callback_event;
mod chat_message;
mod lenient;
mod llm_result;
mod run_error;
mod run_info;
mod run_kind;
#[cfg(test)]
mod run_kind_test;
mod serialized;
mod trace_node;
mod trace_snapshot;

pub use callback_event::CallbackEvent;
pub use chat_message::{ChatMessage, buffer_string};
pub use llm_result::{Generation, LlmOutput, LlmResult, TokenUsage};
pub use run_error::RunError;
pub use run_info::RunInfo;
pub use run_kind::RunKind;
pub use serialized::Serialized;
pub use trace_node::{TraceEdge, TraceNode};
pub use trace_snapshot::{TRACE_SNAPSHOT_VERSION, TraceSnapshot};
