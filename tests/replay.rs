//! Integration tests that replay the JSON Lines fixtures in tests/fixtures/ through the library
//! and through the trace_replay CLI.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

use agent_calltree::trace_io::load_snapshot;
use agent_calltree::{
  LoggerConfig, MemorySink, ReplayMode, SessionOptions, TraceError, TraceSession, replay_file,
};

fn fixture(name: &str) -> PathBuf {
  Path::new(env!("CARGO_MANIFEST_DIR"))
    .join("tests")
    .join("fixtures")
    .join(name)
}

fn quiet_session(options: SessionOptions) -> (TraceSession, Arc<MemorySink>) {
  let sink = Arc::new(MemorySink::new());
  (TraceSession::with_log_sink(options, sink.clone()), sink)
}

/// Run the trace_replay binary. Returns (stdout, stderr, success).
fn run_trace_replay(args: &[&str], env: &[(&str, &str)]) -> (String, String, bool) {
  let mut cmd = Command::new(env!("CARGO_BIN_EXE_trace_replay"));
  cmd
    .args(args)
    .env_remove("CALLTREE_OUTPUT")
    .env_remove("CALLTREE_SNAPSHOT")
    .env_remove("CALLTREE_LOG_CHAIN_EVENTS")
    .env("RUST_LOG", "info")
    .env("NO_COLOR", "1");
  for (k, v) in env {
    cmd.env(k, v);
  }
  let out = cmd.output().expect("run trace_replay");
  (
    String::from_utf8_lossy(&out.stdout).into_owned(),
    String::from_utf8_lossy(&out.stderr).into_owned(),
    out.status.success(),
  )
}

// ---- library replay ----

#[tokio::test]
async fn movie_agent_fixture_builds_expected_tree() {
  let (session, sink) = quiet_session(SessionOptions::default());
  let summary = replay_file(session, &fixture("movie_agent.jsonl"), ReplayMode::Sequential)
    .await
    .expect("replay");

  assert_eq!(summary.node_count, 8);
  assert_eq!(summary.edge_count, 7);

  let d = &summary.diagram;
  assert!(d.starts_with("flowchart TD\n  classDef llm fill:#fff3,stroke:#bbb;"));
  assert!(d.contains("  0a1b_root[\"RunnableSequence\n(chain)\"]\n  class 0a1b_root chain;"));
  assert!(d.contains("  0a1b_rephrase_llm[\"ChatOpenAI\n(llm)\"]"));
  assert!(d.contains("  0a1b_agent[\"AgentExecutor\n(chain)\"]"));
  assert!(d.contains("  0a1b_cypher[\"graph-cypher-retrieval-chain\n(tool)\"]"));
  assert!(d.contains("  0a1b_retriever[\"VectorStoreRetriever\n(retriever)\"]"));
  assert!(d.contains("  0a1b_answer[\"OpenAI\n(llm)\"]"));
  assert!(d.contains("  0a1b_root -->|chain| 0a1b_agent"));
  assert!(d.contains("  0a1b_agent -->|tool| 0a1b_vector"));
  assert!(d.contains("  0a1b_vector -->|retriever| 0a1b_retriever"));
  assert!(d.ends_with("  0a1b_vector -->|llm| 0a1b_answer"));

  // Tool start/error/start/end, two model starts and ends; chains are not logged by default.
  let lines = sink.lines();
  assert_eq!(lines.len(), 8);
  assert!(lines.iter().any(|l| l == "[tool ✗] { run_id: \"0a1b-cypher\", err: \"Invalid input 'RETRUN'\" }"));
  assert!(lines.iter().any(|l| l.starts_with("[llm ▶] prompt { run_id: \"0a1b-rephrase-llm\", preview: \"System: Rephrase the question as a standalone question. Human: Recommend a heist movie like Heat\" }")));
  let usage_line = lines
    .iter()
    .find(|l| l.starts_with("[llm ✓] { run_id: \"0a1b-rephrase-llm\""))
    .expect("usage line");
  for part in ["\"promptTokens\":41", "\"completionTokens\":9", "\"totalTokens\":50"] {
    assert!(usage_line.contains(part), "{usage_line}");
  }
  assert!(lines.iter().any(|l| l == "[llm ✓] { run_id: \"0a1b-answer\", usage: undefined }"));
}

#[tokio::test]
async fn chain_logging_toggle_adds_chain_lines() {
  let options = SessionOptions {
    logger: LoggerConfig {
      log_chain_events: true,
      ..LoggerConfig::default()
    },
    ..SessionOptions::default()
  };
  let (session, sink) = quiet_session(options);
  replay_file(session, &fixture("movie_agent.jsonl"), ReplayMode::Sequential)
    .await
    .expect("replay");
  let lines = sink.lines();
  assert_eq!(lines.len(), 8 + 6);
  assert!(lines[0].starts_with("[chain ▶] RunnableSequence { run_id: \"0a1b-root\", parent_run_id: undefined"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_replay_matches_counts() {
  let (session, _) = quiet_session(SessionOptions::default());
  let summary = replay_file(session, &fixture("movie_agent.jsonl"), ReplayMode::Concurrent)
    .await
    .expect("replay");
  assert_eq!(summary.node_count, 8);
  assert_eq!(summary.edge_count, 7);
}

#[tokio::test]
async fn malformed_fixture_reports_line() {
  let (session, _) = quiet_session(SessionOptions::default());
  let err = replay_file(session, &fixture("malformed.jsonl"), ReplayMode::Sequential)
    .await
    .unwrap_err();
  assert!(matches!(err, TraceError::EventLine { line: 2, .. }));
}

#[tokio::test]
async fn missing_file_is_io_error() {
  let (session, _) = quiet_session(SessionOptions::default());
  let err = replay_file(session, &fixture("does_not_exist.jsonl"), ReplayMode::Sequential)
    .await
    .unwrap_err();
  assert!(matches!(err, TraceError::Io { .. }));
}

// ---- CLI ----

#[test]
fn cli_writes_diagram_and_snapshot() {
  let dir = tempfile::tempdir().unwrap();
  let out = dir.path().join("diagrams").join("trace.mmd");
  let snap = dir.path().join("trace.json");
  let events = fixture("movie_agent.jsonl");
  let (stdout, stderr, success) = run_trace_replay(
    &[
      "--output",
      out.to_str().unwrap(),
      "--snapshot",
      snap.to_str().unwrap(),
      events.to_str().unwrap(),
    ],
    &[],
  );
  assert!(success, "stderr={}", stderr);
  assert!(stdout.contains("Trace recorded."));
  assert!(stdout.contains("Nodes: 8"));
  assert!(stdout.contains("Edges: 7"));

  let diagram = std::fs::read_to_string(&out).unwrap();
  assert!(diagram.starts_with("flowchart TD"));
  let snapshot = load_snapshot(&snap).unwrap();
  assert_eq!(snapshot.nodes.len(), 8);
  assert_eq!(snapshot.to_mermaid(), diagram);

  // Compact log lines go to stderr through tracing.
  assert!(stderr.contains("[tool ▶] graph-vector-retrieval-chain"));
  assert!(!stderr.contains("[chain ▶]"));
}

#[test]
fn cli_env_overrides_output_flag() {
  let dir = tempfile::tempdir().unwrap();
  let flag_out = dir.path().join("flag.mmd");
  let env_out = dir.path().join("env.mmd");
  let events = fixture("movie_agent.jsonl");
  let (_, stderr, success) = run_trace_replay(
    &["--output", flag_out.to_str().unwrap(), events.to_str().unwrap()],
    &[
      ("CALLTREE_OUTPUT", env_out.to_str().unwrap()),
      ("CALLTREE_LOG_CHAIN_EVENTS", "1"),
    ],
  );
  assert!(success, "stderr={}", stderr);
  assert!(env_out.exists());
  assert!(!flag_out.exists());
  assert!(stderr.contains("[chain ▶] RunnableSequence"));
}

#[test]
fn cli_fails_on_malformed_events() {
  let dir = tempfile::tempdir().unwrap();
  let out = dir.path().join("trace.mmd");
  let events = fixture("malformed.jsonl");
  let (_, stderr, success) = run_trace_replay(
    &["--output", out.to_str().unwrap(), events.to_str().unwrap()],
    &[],
  );
  assert!(!success);
  assert!(stderr.contains("malformed.jsonl:2: invalid callback event"));
  assert!(!out.exists());
}
