//! Call-tree recorder: builds a forest of runs from start events.
//!
//! Nodes are keyed by run id and kept in discovery order; an edge is appended for every start
//! event that names a parent. End and error events do not touch the tree.

use std::collections::HashMap;

use parking_lot::Mutex;
use serde_json::Value;
use tracing::trace;

use crate::handler::CallbackHandler;
use crate::mermaid;
use crate::types::{
  ChatMessage, RunInfo, RunKind, Serialized, TraceEdge, TraceNode, TraceSnapshot,
};

/// Nodes, their index by run id, and edges.
#[derive(Debug, Default)]
struct TraceState {
  index: HashMap<String, usize>,
  nodes: Vec<TraceNode>,
  edges: Vec<TraceEdge>,
}

impl TraceState {
  /// First registration wins; later starts for the same id are ignored.
  fn add_node(&mut self, run_id: &str, name: &str, kind: RunKind) {
    if self.index.contains_key(run_id) {
      trace!(run_id, kind = %kind, "duplicate start ignored");
      return;
    }
    self.index.insert(run_id.to_string(), self.nodes.len());
    self.nodes.push(TraceNode::new(run_id, name, kind));
    trace!(run_id, name, kind = %kind, "node registered");
  }

  /// Parent is not required to be a known node.
  fn add_edge(&mut self, parent_run_id: Option<&str>, run_id: &str, kind: RunKind) {
    if let Some(parent) = parent_run_id {
      self.edges.push(TraceEdge::new(parent, run_id, kind));
    }
  }
}

/// Records the parent/child structure of observed runs and renders it as Mermaid.
///
/// Safe to share between concurrently running operations (`Arc<MermaidTracer>`). Use one tracer
/// per traced session.
#[derive(Debug, Default)]
pub struct MermaidTracer {
  state: Mutex<TraceState>,
}

impl MermaidTracer {
  pub fn new() -> Self {
    Self::default()
  }

  fn register(&self, run: &RunInfo, name: &str, kind: RunKind) {
    let mut state = self.state.lock();
    state.add_node(&run.run_id, name, kind);
    state.add_edge(run.parent(), &run.run_id, kind);
  }

  /// Number of distinct runs seen.
  pub fn node_count(&self) -> usize {
    self.state.lock().nodes.len()
  }

  pub fn edge_count(&self) -> usize {
    self.state.lock().edges.len()
  }

  /// Nodes in discovery order.
  pub fn nodes(&self) -> Vec<TraceNode> {
    self.state.lock().nodes.clone()
  }

  /// Edges in discovery order.
  pub fn edges(&self) -> Vec<TraceEdge> {
    self.state.lock().edges.clone()
  }

  /// Node registered for `run_id`, if any.
  pub fn node(&self, run_id: &str) -> Option<TraceNode> {
    let state = self.state.lock();
    state.index.get(run_id).map(|&i| state.nodes[i].clone())
  }

  /// Renders the current tree. Callable at any time, including mid-trace.
  pub fn to_mermaid(&self) -> String {
    let state = self.state.lock();
    mermaid::render(&state.nodes, &state.edges)
  }

  pub fn snapshot(&self) -> TraceSnapshot {
    let state = self.state.lock();
    TraceSnapshot::now(state.nodes.clone(), state.edges.clone())
  }
}

impl CallbackHandler for MermaidTracer {
  fn name(&self) -> &str {
    "MermaidTracer"
  }

  fn on_llm_start(&self, llm: &Serialized, _prompts: &[String], run: &RunInfo) {
    self.register(run, llm.name_or_id_leaf("LLM"), RunKind::Model);
  }

  fn on_chat_model_start(&self, llm: &Serialized, _messages: &[Vec<ChatMessage>], run: &RunInfo) {
    self.register(run, llm.name_or_id_leaf("ChatModel"), RunKind::Model);
  }

  fn on_chain_start(&self, chain: &Serialized, _inputs: &Value, run: &RunInfo) {
    self.register(run, chain.id_leaf_or_name("Chain"), RunKind::Chain);
  }

  fn on_tool_start(&self, tool: &Serialized, _input: &str, run: &RunInfo) {
    self.register(run, tool.name_or_id_leaf("Tool"), RunKind::Tool);
  }

  fn on_retriever_start(&self, retriever: &Serialized, _query: &str, run: &RunInfo) {
    self.register(run, retriever.name_or_id_leaf("Retriever"), RunKind::Retriever);
  }
}
