//! One traced top-level invocation: a fresh recorder, a compact logger, and the manager that
//! feeds them.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::callback_manager::CallbackManager;
use crate::error::TraceError;
use crate::handler::CallbackHandler;
use crate::log_sink::{LogSink, TracingSink};
use crate::logger::{CompactLogger, LoggerConfig};
use crate::trace_io;
use crate::tracer::MermaidTracer;
use crate::types::CallbackEvent;

/// Options for [TraceSession].
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
  /// If set, the diagram is written here on [TraceSession::finish].
  pub diagram_path: Option<PathBuf>,
  /// If set, a JSON snapshot of the tree is written here on [TraceSession::finish].
  pub snapshot_path: Option<PathBuf>,
  pub logger: LoggerConfig,
}

/// What a finished session produced.
#[derive(Debug, Clone)]
pub struct SessionSummary {
  pub session_id: Uuid,
  /// Rendered Mermaid text.
  pub diagram: String,
  pub node_count: usize,
  pub edge_count: usize,
  pub diagram_path: Option<PathBuf>,
  pub snapshot_path: Option<PathBuf>,
}

/// Per-session tracing bundle. Build one per top-level invocation; never reuse a session's
/// tracer for another invocation.
#[derive(Debug)]
pub struct TraceSession {
  id: Uuid,
  tracer: Arc<MermaidTracer>,
  callbacks: CallbackManager,
  options: SessionOptions,
}

impl TraceSession {
  /// Session whose logger writes to `tracing`.
  pub fn new(options: SessionOptions) -> Self {
    Self::with_log_sink(options, Arc::new(TracingSink))
  }

  pub fn with_log_sink(options: SessionOptions, sink: Arc<dyn LogSink>) -> Self {
    let id = Uuid::new_v4();
    let tracer = Arc::new(MermaidTracer::new());
    let logger = Arc::new(CompactLogger::with_sink(options.logger.clone(), sink));
    let callbacks = CallbackManager::new()
      .with_handler(tracer.clone())
      .with_handler(logger);
    debug!(session_id = %id, "trace session started");
    Self {
      id,
      tracer,
      callbacks,
      options,
    }
  }

  pub fn id(&self) -> Uuid {
    self.id
  }

  pub fn tracer(&self) -> &Arc<MermaidTracer> {
    &self.tracer
  }

  /// Handlers to pass to the execution engine. Cheap to clone.
  pub fn callbacks(&self) -> &CallbackManager {
    &self.callbacks
  }

  /// Attaches an extra observer after the tracer and logger.
  pub fn add_handler(&mut self, handler: Arc<dyn CallbackHandler>) {
    self.callbacks.add_handler(handler);
  }

  pub fn emit(&self, event: &CallbackEvent) {
    self.callbacks.emit(event);
  }

  /// Renders the tree and writes the configured artifacts.
  pub fn finish(self) -> Result<SessionSummary, TraceError> {
    let diagram = self.tracer.to_mermaid();
    if let Some(path) = &self.options.diagram_path {
      trace_io::write_diagram(path, &diagram)?;
    }
    if let Some(path) = &self.options.snapshot_path {
      trace_io::save_snapshot(path, &self.tracer.snapshot())?;
    }
    let summary = SessionSummary {
      session_id: self.id,
      diagram,
      node_count: self.tracer.node_count(),
      edge_count: self.tracer.edge_count(),
      diagram_path: self.options.diagram_path,
      snapshot_path: self.options.snapshot_path,
    };
    info!(
      session_id = %summary.session_id,
      nodes = summary.node_count,
      edges = summary.edge_count,
      diagram = ?summary.diagram_path,
      "trace session finished"
    );
    Ok(summary)
  }
}
