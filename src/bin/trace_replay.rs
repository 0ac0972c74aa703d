//! CLI: Replay recorded callback events and write the call-tree diagram.
//!
//! Reads a JSON Lines file (one callback event per line), feeds it through a fresh trace
//! session (call-tree recorder + compact logger), and writes the Mermaid diagram.
//!
//! Usage: `trace_replay [OPTIONS] <path-to-events.jsonl>`
//! Example: trace_replay --snapshot .calltree/trace.json runs/movie-agent.jsonl
//!
//! Set RUST_LOG=agent_calltree=trace for recorder-level detail.

use clap::Parser;
use std::env;
use std::path::PathBuf;
use std::process;
use agent_calltree::trace_io::{DIAGRAM_FILENAME, TRACE_DIR};
use agent_calltree::{LoggerConfig, ReplayMode, SessionOptions, TraceSession, replay_file};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Replay recorded callback events and write the call-tree diagram.
#[derive(Parser, Debug)]
#[command(name = "trace_replay")]
#[command(
  after_help = r#"Environment variables (override --output and --snapshot when set):
  CALLTREE_OUTPUT             Path for the Mermaid diagram (default: .calltree/trace.mmd).
  CALLTREE_SNAPSHOT           Path for a JSON snapshot of the recorded tree.
  CALLTREE_LOG_CHAIN_EVENTS   Set to 1/true to also log chain start/end lines.

Examples:
  trace_replay runs/movie-agent.jsonl
  trace_replay --output /tmp/trace.mmd --concurrent runs/movie-agent.jsonl"#
)]
struct Args {
  /// Where to write the Mermaid diagram. Overridden by CALLTREE_OUTPUT if set.
  #[arg(long, value_name = "FILE")]
  output: Option<PathBuf>,

  /// Also write a JSON snapshot of the recorded tree. Overridden by CALLTREE_SNAPSHOT if set.
  #[arg(long, value_name = "FILE")]
  snapshot: Option<PathBuf>,

  /// Log chain start/end events (off by default).
  #[arg(long)]
  log_chain_events: bool,

  /// Replay each root run on its own task instead of in file order.
  #[arg(long)]
  concurrent: bool,

  /// Path to the JSON Lines event file
  #[arg(value_name = "path-to-events.jsonl")]
  events_path: PathBuf,
}

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_writer(std::io::stderr)
    .init();

  let args = Args::parse();

  // Env vars override flags.
  let diagram_path = env::var("CALLTREE_OUTPUT")
    .ok()
    .map(PathBuf::from)
    .or_else(|| args.output.clone())
    .unwrap_or_else(|| PathBuf::from(TRACE_DIR).join(DIAGRAM_FILENAME));
  let snapshot_path = env::var("CALLTREE_SNAPSHOT")
    .ok()
    .map(PathBuf::from)
    .or_else(|| args.snapshot.clone());
  let mut logger = LoggerConfig::from_env();
  logger.log_chain_events |= args.log_chain_events;
  let mode = if args.concurrent {
    ReplayMode::Concurrent
  } else {
    ReplayMode::Sequential
  };

  info!(
    events = %args.events_path.display(),
    diagram = %diagram_path.display(),
    snapshot = ?snapshot_path,
    log_chain_events = logger.log_chain_events,
    ?mode,
    "trace_replay starting"
  );

  let session = TraceSession::new(SessionOptions {
    diagram_path: Some(diagram_path),
    snapshot_path,
    logger,
  });

  let summary = match replay_file(session, &args.events_path, mode).await {
    Ok(s) => s,
    Err(e) => {
      eprintln!("Error: {}", e);
      process::exit(1);
    }
  };

  println!("Trace recorded.");
  println!("  Nodes: {}", summary.node_count);
  println!("  Edges: {}", summary.edge_count);
  if let Some(path) = &summary.diagram_path {
    println!("  Diagram: {}", path.display());
  }
  if let Some(path) = &summary.snapshot_path {
    println!("  Snapshot: {}", path.display());
  }
}
