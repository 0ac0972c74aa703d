//! Log records produced by the compact logger and the sinks that receive them.

use std::fmt;

use parking_lot::Mutex;
use serde_json::Value;

use crate::types::RunKind;

/// Tracing target used by [TracingSink].
pub const LOG_TARGET: &str = "agent_calltree::logger";

/// Lifecycle phase of a logged event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogPhase {
  Start,
  End,
  Error,
}

impl LogPhase {
  pub fn glyph(&self) -> &'static str {
    match self {
      LogPhase::Start => "▶",
      LogPhase::End => "✓",
      LogPhase::Error => "✗",
    }
  }
}

/// One structured field. `None` is an undefined value: the field is present but carries nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct LogField {
  pub key: &'static str,
  pub value: Option<Value>,
}

/// A single log line: `[<scope> <glyph>] <headline> {<fields>}`.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
  pub scope: RunKind,
  pub phase: LogPhase,
  pub headline: Option<String>,
  pub fields: Vec<LogField>,
}

impl LogRecord {
  pub fn new(scope: RunKind, phase: LogPhase) -> Self {
    Self {
      scope,
      phase,
      headline: None,
      fields: Vec::new(),
    }
  }

  pub fn headline(mut self, headline: impl Into<String>) -> Self {
    self.headline = Some(headline.into());
    self
  }

  /// Appends a field; pass `None` for an undefined value.
  pub fn field(mut self, key: &'static str, value: Option<Value>) -> Self {
    self.fields.push(LogField { key, value });
    self
  }

  /// `[tool ▶]`, `[llm ✓]`, `[chain ✗]`, ...
  pub fn prefix(&self) -> String {
    format!("[{} {}]", self.scope, self.phase.glyph())
  }

  /// Field by key. `Some(None)` means the field is present but undefined.
  pub fn get(&self, key: &str) -> Option<Option<&Value>> {
    self
      .fields
      .iter()
      .find(|f| f.key == key)
      .map(|f| f.value.as_ref())
  }

  pub fn is_error(&self) -> bool {
    self.phase == LogPhase::Error
  }
}

impl fmt::Display for LogRecord {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.prefix())?;
    if let Some(headline) = &self.headline {
      write!(f, " {}", headline)?;
    }
    f.write_str(" {")?;
    for (i, field) in self.fields.iter().enumerate() {
      if i > 0 {
        f.write_str(",")?;
      }
      match &field.value {
        Some(v) => write!(f, " {}: {}", field.key, v)?,
        None => write!(f, " {}: undefined", field.key)?,
      }
    }
    f.write_str(" }")
  }
}

/// Line-oriented destination for log records. One call per record, no buffering.
pub trait LogSink: Send + Sync {
  fn emit(&self, record: &LogRecord);
}

/// Emits each record as one `tracing` event: errors at ERROR, everything else at INFO.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
  fn emit(&self, record: &LogRecord) {
    if record.is_error() {
      tracing::error!(target: LOG_TARGET, "{}", record);
    } else {
      tracing::info!(target: LOG_TARGET, "{}", record);
    }
  }
}

/// Keeps every record in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
  records: Mutex<Vec<LogRecord>>,
}

impl MemorySink {
  pub fn new() -> Self {
    Self::default()
  }

  /// Records emitted so far, oldest first.
  pub fn records(&self) -> Vec<LogRecord> {
    self.records.lock().clone()
  }

  /// Rendered lines emitted so far.
  pub fn lines(&self) -> Vec<String> {
    self.records.lock().iter().map(ToString::to_string).collect()
  }

  pub fn clear(&self) {
    self.records.lock().clear();
  }
}

impl LogSink for MemorySink {
  fn emit(&self, record: &LogRecord) {
    self.records.lock().push(record.clone());
  }
}
