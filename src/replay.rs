//! Replays recorded callback events through a trace session.
//!
//! - [ReplayMode::Sequential]: events are emitted in file order.
//! - [ReplayMode::Concurrent]: events are grouped by their root run and each group is emitted on
//!   its own tokio task, interleaving independent top-level invocations.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, instrument};

use crate::error::TraceError;
use crate::session::{SessionSummary, TraceSession};
use crate::trace_io;
use crate::types::CallbackEvent;

/// How events are fed to the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReplayMode {
  #[default]
  Sequential,
  Concurrent,
}

/// Splits events into one group per root run, keeping file order within each group and
/// ordering groups by first appearance.
///
/// A start event's root is its parent's root (or the parent itself when the parent was never
/// started); end and error events follow the root of their run.
pub fn group_by_root(events: Vec<CallbackEvent>) -> Vec<Vec<CallbackEvent>> {
  let mut root_of: HashMap<String, String> = HashMap::new();
  let mut group_of_root: HashMap<String, usize> = HashMap::new();
  let mut groups: Vec<Vec<CallbackEvent>> = Vec::new();

  for event in events {
    let run_id = event.run_id().to_string();
    let root = match event.run_info() {
      Some(run) => {
        let root = match run.parent() {
          Some(parent) => root_of.get(parent).cloned().unwrap_or_else(|| parent.to_string()),
          None => run_id.clone(),
        };
        root_of.entry(run_id).or_insert(root).clone()
      }
      None => root_of.get(&run_id).cloned().unwrap_or(run_id),
    };
    let next = groups.len();
    let index = *group_of_root.entry(root).or_insert(next);
    if index == groups.len() {
      groups.push(Vec::new());
    }
    groups[index].push(event);
  }
  groups
}

/// Emits `events` into `session`, then finishes it.
#[instrument(level = "trace", skip(session, events), fields(events = events.len()))]
pub async fn replay_events(
  session: TraceSession,
  events: Vec<CallbackEvent>,
  mode: ReplayMode,
) -> Result<SessionSummary, TraceError> {
  match mode {
    ReplayMode::Sequential => {
      for event in &events {
        session.emit(event);
      }
    }
    ReplayMode::Concurrent => {
      let groups = group_by_root(events);
      debug!(groups = groups.len(), "replaying root runs concurrently");
      let mut handles = Vec::with_capacity(groups.len());
      for group in groups {
        let callbacks = session.callbacks().clone();
        handles.push(tokio::spawn(async move {
          for event in &group {
            callbacks.emit(event);
            tokio::task::yield_now().await;
          }
        }));
      }
      for handle in handles {
        handle.await.map_err(|e| TraceError::Join(e.to_string()))?;
      }
    }
  }
  session.finish()
}

/// Loads a JSON Lines event file and replays it.
pub async fn replay_file(
  session: TraceSession,
  path: &Path,
  mode: ReplayMode,
) -> Result<SessionSummary, TraceError> {
  let events = trace_io::load_events(path)?;
  replay_events(session, events, mode).await
}
