//! DTO for trace.json: the recorder's nodes and edges at a point in time.

use serde::{Deserialize, Serialize};

use super::{TraceEdge, TraceNode};

/// Current snapshot format version.
pub const TRACE_SNAPSHOT_VERSION: u32 = 1;

/// Root structure for trace.json.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceSnapshot {
  /// Snapshot format version.
  pub version: u32,
  /// RFC 3339 timestamp when the snapshot was taken.
  pub captured_at: String,
  /// Nodes in discovery order.
  pub nodes: Vec<TraceNode>,
  /// Edges in discovery order.
  pub edges: Vec<TraceEdge>,
}

impl TraceSnapshot {
  /// Snapshot stamped with the current time.
  pub fn now(nodes: Vec<TraceNode>, edges: Vec<TraceEdge>) -> Self {
    Self {
      version: TRACE_SNAPSHOT_VERSION,
      captured_at: chrono::Utc::now().to_rfc3339(),
      nodes,
      edges,
    }
  }

  /// Renders the snapshot as a Mermaid flowchart.
  pub fn to_mermaid(&self) -> String {
    crate::mermaid::render(&self.nodes, &self.edges)
  }
}
