//! Mermaid flowchart rendering of a recorded call tree.
//!
//! Output is a pure function of the nodes and edges passed in: style classes first (always all
//! of them, in a fixed order, so diagrams diff cleanly across runs), then node declarations in
//! discovery order, then edges in discovery order.

use crate::types::{TraceEdge, TraceNode};

/// Diagram header.
pub const FLOWCHART_HEADER: &str = "flowchart TD";

/// `(class, style)` pairs, in emission order. `prompt` is reserved and never assigned.
pub const STYLE_CLASSES: [(&str, &str); 5] = [
  ("llm", "fill:#fff3,stroke:#bbb"),
  ("chain", "fill:#e3f2fd,stroke:#64b5f6"),
  ("tool", "fill:#e8f5e9,stroke:#81c784"),
  ("retriever", "fill:#fff8e1,stroke:#ffb300"),
  ("prompt", "fill:#f3e5f5,stroke:#ba68c8"),
];

/// Replaces every character outside `[A-Za-z0-9_]` with `_`.
///
/// Lossy: `a-1` and `a_1` both become `a_1`, and nothing downstream deduplicates them.
pub fn sanitize_id(id: &str) -> String {
  id.chars()
    .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
    .collect()
}

/// Escapes double quotes; everything else (newlines included) passes through.
pub fn escape_label(label: &str) -> String {
  label.replace('"', "\\\"")
}

/// Renders nodes and edges as Mermaid flowchart text (lines joined by `\n`, no trailing newline).
pub fn render(nodes: &[TraceNode], edges: &[TraceEdge]) -> String {
  let mut lines: Vec<String> =
    Vec::with_capacity(1 + STYLE_CLASSES.len() + nodes.len() * 2 + edges.len());
  lines.push(FLOWCHART_HEADER.to_string());
  for (class, style) in STYLE_CLASSES {
    lines.push(format!("  classDef {} {};", class, style));
  }

  for node in nodes {
    let id = sanitize_id(&node.id);
    lines.push(format!("  {}[\"{}\"]", id, escape_label(&node.label)));
    lines.push(format!("  class {} {};", id, node.kind));
  }

  for edge in edges {
    let label = match edge.label.as_deref() {
      Some(l) if !l.is_empty() => format!("|{}|", l),
      _ => String::new(),
    };
    lines.push(format!(
      "  {} -->{} {}",
      sanitize_id(&edge.from),
      label,
      sanitize_id(&edge.to)
    ));
  }

  lines.join("\n")
}
