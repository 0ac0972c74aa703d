//! Compact one-line-per-event logger for tool, model and (optionally) chain runs.
//!
//! Stateless across events: each notification becomes exactly one [LogRecord] handed to the
//! sink at call time.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::handler::CallbackHandler;
use crate::log_sink::{LogPhase, LogRecord, LogSink, TracingSink};
use crate::types::{
  ChatMessage, LlmResult, RunError, RunInfo, RunKind, Serialized, buffer_string,
};

/// Default number of prompt UTF-16 code units kept in a model-start preview.
pub const DEFAULT_PREVIEW_CHARS: usize = 120;

/// Environment variable that turns chain-level logging on.
pub const LOG_CHAIN_EVENTS_ENV: &str = "CALLTREE_LOG_CHAIN_EVENTS";

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Options for [CompactLogger].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
  /// Log chain start/end events. Off by default: chains are noisy.
  pub log_chain_events: bool,
  /// UTF-16 code units of the prompt kept in model-start previews.
  pub preview_chars: usize,
}

impl Default for LoggerConfig {
  fn default() -> Self {
    Self {
      log_chain_events: false,
      preview_chars: DEFAULT_PREVIEW_CHARS,
    }
  }
}

impl LoggerConfig {
  /// Defaults, with `log_chain_events` taken from `CALLTREE_LOG_CHAIN_EVENTS` when set.
  pub fn from_env() -> Self {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
    let log_chain_events = lookup(LOG_CHAIN_EVENTS_ENV)
      .map(|v| parse_flag(&v))
      .unwrap_or(false);
    Self {
      log_chain_events,
      ..Self::default()
    }
  }
}

/// `1`, `true`, `yes`, `on` (any case) are true.
pub(crate) fn parse_flag(value: &str) -> bool {
  matches!(
    value.trim().to_ascii_lowercase().as_str(),
    "1" | "true" | "yes" | "on"
  )
}

/// First `max_units` UTF-16 code units of `prompt`, then every whitespace run collapsed to one
/// space. A character outside the BMP that would straddle the limit is dropped whole.
pub fn prompt_preview(prompt: &str, max_units: usize) -> String {
  let mut units = 0;
  let truncated: String = prompt
    .chars()
    .take_while(|c| {
      units += c.len_utf16();
      units <= max_units
    })
    .collect();
  WHITESPACE_RUN.replace_all(&truncated, " ").into_owned()
}

fn text(s: &str) -> Option<Value> {
  Some(Value::String(s.to_string()))
}

fn opt_text(s: Option<&str>) -> Option<Value> {
  s.map(|s| Value::String(s.to_string()))
}

/// Logs tool and model lifecycle events as single human-scannable lines.
pub struct CompactLogger {
  config: LoggerConfig,
  sink: Arc<dyn LogSink>,
}

impl std::fmt::Debug for CompactLogger {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CompactLogger")
      .field("config", &self.config)
      .finish_non_exhaustive()
  }
}

impl Default for CompactLogger {
  fn default() -> Self {
    Self::new(LoggerConfig::default())
  }
}

impl CompactLogger {
  /// Logger writing to `tracing`.
  pub fn new(config: LoggerConfig) -> Self {
    Self::with_sink(config, Arc::new(TracingSink))
  }

  pub fn with_sink(config: LoggerConfig, sink: Arc<dyn LogSink>) -> Self {
    Self { config, sink }
  }

  pub fn config(&self) -> &LoggerConfig {
    &self.config
  }

  fn emit(&self, record: LogRecord) {
    self.sink.emit(&record);
  }

  fn model_start(&self, first_prompt: Option<&str>, run: &RunInfo) {
    let preview = first_prompt
      .map(|p| prompt_preview(p, self.config.preview_chars))
      .unwrap_or_default();
    self.emit(
      LogRecord::new(RunKind::Model, LogPhase::Start)
        .headline("prompt")
        .field("run_id", text(&run.run_id))
        .field("preview", Some(Value::String(preview))),
    );
  }

  fn error(&self, scope: RunKind, error: &RunError, run_id: &str) {
    self.emit(
      LogRecord::new(scope, LogPhase::Error)
        .field("run_id", text(run_id))
        .field("err", text(&error.message)),
    );
  }
}

impl CallbackHandler for CompactLogger {
  fn name(&self) -> &str {
    "CompactConsoleLogger"
  }

  fn on_llm_start(&self, _llm: &Serialized, prompts: &[String], run: &RunInfo) {
    self.model_start(prompts.first().map(String::as_str), run);
  }

  fn on_chat_model_start(&self, _llm: &Serialized, messages: &[Vec<ChatMessage>], run: &RunInfo) {
    let transcript = messages.first().map(|batch| buffer_string(batch));
    self.model_start(transcript.as_deref(), run);
  }

  fn on_llm_end(&self, output: &LlmResult, run_id: &str) {
    let usage = output
      .token_usage()
      .and_then(|u| serde_json::to_value(u).ok());
    self.emit(
      LogRecord::new(RunKind::Model, LogPhase::End)
        .field("run_id", text(run_id))
        .field("usage", usage),
    );
  }

  fn on_llm_error(&self, error: &RunError, run_id: &str) {
    self.error(RunKind::Model, error, run_id);
  }

  fn on_chain_start(&self, chain: &Serialized, inputs: &Value, run: &RunInfo) {
    if !self.config.log_chain_events {
      return;
    }
    self.emit(
      LogRecord::new(RunKind::Chain, LogPhase::Start)
        .headline(chain.name_or_id_leaf("Chain"))
        .field("run_id", text(&run.run_id))
        .field("parent_run_id", opt_text(run.parent()))
        .field("inputs", Some(inputs.clone())),
    );
  }

  fn on_chain_end(&self, outputs: &Value, run_id: &str) {
    if !self.config.log_chain_events {
      return;
    }
    self.emit(
      LogRecord::new(RunKind::Chain, LogPhase::End)
        .field("run_id", text(run_id))
        .field("outputs", Some(outputs.clone())),
    );
  }

  fn on_chain_error(&self, error: &RunError, run_id: &str) {
    self.error(RunKind::Chain, error, run_id);
  }

  fn on_tool_start(&self, tool: &Serialized, input: &str, run: &RunInfo) {
    let name = run.run_name().unwrap_or_else(|| tool.name_or_id_leaf("Tool"));
    self.emit(
      LogRecord::new(RunKind::Tool, LogPhase::Start)
        .headline(name)
        .field("run_id", text(&run.run_id))
        .field("parent_run_id", opt_text(run.parent()))
        .field("input", text(input)),
    );
  }

  fn on_tool_end(&self, output: &Value, run_id: &str) {
    self.emit(
      LogRecord::new(RunKind::Tool, LogPhase::End)
        .field("run_id", text(run_id))
        .field("output", Some(output.clone())),
    );
  }

  fn on_tool_error(&self, error: &RunError, run_id: &str) {
    self.error(RunKind::Tool, error, run_id);
  }
}
