//! # agent-calltree
//!
//! Observes the callback events an agent-execution engine emits for model, chain, tool and
//! retriever runs, and turns them into:
//!
//! - a call tree rendered as a Mermaid flowchart ([MermaidTracer], [mermaid]),
//! - compact one-line-per-event logs ([CompactLogger]).
//!
//! ## Architecture
//!
//! Observers implement [CallbackHandler]. A [CallbackManager] forwards each [CallbackEvent] to
//! every attached handler. [TraceSession] wires a fresh tracer and logger together for one
//! top-level invocation and writes the diagram when it finishes. Recorded events (JSON Lines)
//! can be replayed offline with [replay] or the `trace_replay` binary.

pub mod callback_manager;
pub mod error;
pub mod handler;
pub mod log_sink;
pub mod logger;
pub mod mermaid;
pub mod replay;
pub mod session;
#[cfg(test)]
mod session_test;
pub mod trace_io;
pub mod tracer;
pub mod types;

pub use callback_manager::CallbackManager;
pub use error::TraceError;
pub use handler::CallbackHandler;
pub use log_sink::{LogRecord, LogSink, MemorySink, TracingSink};
pub use logger::{CompactLogger, LoggerConfig};
pub use replay::{ReplayMode, replay_events, replay_file};
pub use session::{SessionOptions, SessionSummary, TraceSession};
pub use tracer::MermaidTracer;
pub use types::{CallbackEvent, RunInfo, RunKind, Serialized, TraceEdge, TraceNode, TraceSnapshot};
