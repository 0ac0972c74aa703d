//! Trace files: Mermaid diagram output, JSON snapshots, and JSON Lines event logs.

use std::path::Path;

use tracing::instrument;

use crate::error::TraceError;
use crate::types::{CallbackEvent, TraceSnapshot};

/// Default directory for trace artifacts.
pub const TRACE_DIR: &str = ".calltree";
/// Default diagram filename under [TRACE_DIR].
pub const DIAGRAM_FILENAME: &str = "trace.mmd";
/// Default snapshot filename under [TRACE_DIR].
pub const SNAPSHOT_FILENAME: &str = "trace.json";

fn ensure_parent(path: &Path) -> Result<(), TraceError> {
  match path.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => {
      std::fs::create_dir_all(parent).map_err(|e| TraceError::io(parent, e))
    }
    _ => Ok(()),
  }
}

/// Writes diagram text to `path` as UTF-8, replacing any previous file.
/// Creates parent directory if needed.
#[instrument(level = "trace", skip(diagram))]
pub fn write_diagram(path: &Path, diagram: &str) -> Result<(), TraceError> {
  ensure_parent(path)?;
  std::fs::write(path, diagram).map_err(|e| TraceError::io(path, e))
}

/// Saves a snapshot to `path` as pretty JSON.
#[instrument(level = "trace", skip(snapshot))]
pub fn save_snapshot(path: &Path, snapshot: &TraceSnapshot) -> Result<(), TraceError> {
  let json = serde_json::to_string_pretty(snapshot).map_err(|e| TraceError::json(path, e))?;
  ensure_parent(path)?;
  std::fs::write(path, json).map_err(|e| TraceError::io(path, e))
}

/// Loads a snapshot from `path`. Returns error if file is missing or invalid JSON.
#[instrument(level = "trace")]
pub fn load_snapshot(path: &Path) -> Result<TraceSnapshot, TraceError> {
  let bytes = std::fs::read(path).map_err(|e| TraceError::io(path, e))?;
  serde_json::from_slice(&bytes).map_err(|e| TraceError::json(path, e))
}

/// Parses JSON Lines text: one event per non-blank line. `path` is only used in errors.
pub fn parse_events(path: &Path, text: &str) -> Result<Vec<CallbackEvent>, TraceError> {
  text
    .lines()
    .enumerate()
    .filter(|(_, line)| !line.trim().is_empty())
    .map(|(i, line)| {
      serde_json::from_str(line).map_err(|source| TraceError::EventLine {
        path: path.to_path_buf(),
        line: i + 1,
        source,
      })
    })
    .collect()
}

/// Loads callback events from a JSON Lines file.
#[instrument(level = "trace")]
pub fn load_events(path: &Path) -> Result<Vec<CallbackEvent>, TraceError> {
  let text = std::fs::read_to_string(path).map_err(|e| TraceError::io(path, e))?;
  parse_events(path, &text)
}

/// Writes events as JSON Lines, one per line.
#[instrument(level = "trace", skip(events))]
pub fn save_events(path: &Path, events: &[CallbackEvent]) -> Result<(), TraceError> {
  let mut out = String::new();
  for event in events {
    let line = serde_json::to_string(event).map_err(|e| TraceError::json(path, e))?;
    out.push_str(&line);
    out.push('\n');
  }
  ensure_parent(path)?;
  std::fs::write(path, out).map_err(|e| TraceError::io(path, e))
}
