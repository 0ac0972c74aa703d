//! Tests for `TraceSession`.

use std::sync::Arc;

use serde_json::json;

use crate::handler::CallbackHandler;
use crate::log_sink::MemorySink;
use crate::session::{SessionOptions, TraceSession};
use crate::trace_io::load_snapshot;
use crate::types::{CallbackEvent, RunInfo, Serialized};

fn tool_start(run_id: &str, parent: &str) -> CallbackEvent {
  CallbackEvent::ToolStart {
    tool: Serialized::named("graph-cypher-retrieval-chain"),
    input: "Who acted in Heat?".to_string(),
    run: RunInfo::child(run_id, parent),
  }
}

#[test]
fn finish_writes_diagram_and_snapshot() {
  let dir = tempfile::tempdir().unwrap();
  let diagram_path = dir.path().join("out").join("trace.mmd");
  let snapshot_path = dir.path().join("out").join("trace.json");
  let options = SessionOptions {
    diagram_path: Some(diagram_path.clone()),
    snapshot_path: Some(snapshot_path.clone()),
    ..SessionOptions::default()
  };
  let session = TraceSession::with_log_sink(options, Arc::new(MemorySink::new()));
  session.emit(&CallbackEvent::ChainStart {
    chain: Serialized::with_id(["langchain", "agents", "AgentExecutor"]),
    inputs: json!({"input": "Who acted in Heat?"}),
    run: RunInfo::root("c"),
  });
  session.emit(&tool_start("t", "c"));

  let summary = session.finish().unwrap();
  assert_eq!(summary.node_count, 2);
  assert_eq!(summary.edge_count, 1);
  assert_eq!(std::fs::read_to_string(&diagram_path).unwrap(), summary.diagram);
  let snap = load_snapshot(&snapshot_path).unwrap();
  assert_eq!(snap.nodes.len(), 2);
  assert_eq!(snap.to_mermaid(), summary.diagram);
}

#[test]
fn finish_overwrites_previous_diagram() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("trace.mmd");
  let options = SessionOptions {
    diagram_path: Some(path.clone()),
    ..SessionOptions::default()
  };

  let first = TraceSession::with_log_sink(options.clone(), Arc::new(MemorySink::new()));
  first.emit(&tool_start("t1", "c"));
  first.emit(&tool_start("t2", "c"));
  first.finish().unwrap();

  let second = TraceSession::with_log_sink(options, Arc::new(MemorySink::new()));
  second.emit(&tool_start("only", "c"));
  let summary = second.finish().unwrap();

  let written = std::fs::read_to_string(&path).unwrap();
  assert_eq!(written, summary.diagram);
  assert!(!written.contains("t1"));
}

#[test]
fn sessions_do_not_share_state() {
  let a = TraceSession::with_log_sink(SessionOptions::default(), Arc::new(MemorySink::new()));
  let b = TraceSession::with_log_sink(SessionOptions::default(), Arc::new(MemorySink::new()));
  a.emit(&tool_start("t", "c"));
  assert_eq!(a.tracer().node_count(), 1);
  assert_eq!(b.tracer().node_count(), 0);
  assert_ne!(a.id(), b.id());
}

#[test]
fn logger_receives_events_alongside_tracer() {
  let sink = Arc::new(MemorySink::new());
  let session = TraceSession::with_log_sink(SessionOptions::default(), sink.clone());
  session.emit(&tool_start("t", "c"));
  session.emit(&CallbackEvent::ToolEnd {
    output: json!(["Al Pacino", "Robert De Niro"]),
    run_id: "t".to_string(),
  });
  assert_eq!(sink.records().len(), 2);
  assert_eq!(session.tracer().node_count(), 1);
}

#[test]
fn extra_handler_sees_events() {
  struct Counter(parking_lot::Mutex<usize>);
  impl CallbackHandler for Counter {
    fn name(&self) -> &str {
      "Counter"
    }
    fn on_tool_start(&self, _tool: &Serialized, _input: &str, _run: &RunInfo) {
      *self.0.lock() += 1;
    }
  }

  let counter = Arc::new(Counter(parking_lot::Mutex::new(0)));
  let mut session = TraceSession::with_log_sink(SessionOptions::default(), Arc::new(MemorySink::new()));
  session.add_handler(counter.clone());
  session.emit(&tool_start("t", "c"));
  assert_eq!(*counter.0.lock(), 1);
  assert_eq!(session.callbacks().handlers().len(), 3);
}

#[test]
fn finish_without_paths_writes_nothing() {
  let session = TraceSession::with_log_sink(SessionOptions::default(), Arc::new(MemorySink::new()));
  let summary = session.finish().unwrap();
  assert!(summary.diagram_path.is_none());
  assert!(summary.diagram.starts_with("flowchart TD"));
}
