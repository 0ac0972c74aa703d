//! Errors from the crate's I/O edges. Callback handlers themselves never fail.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TraceError {
  #[error("{}: {source}", .path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
  #[error("{}: invalid JSON: {source}", .path.display())]
  Json {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },
  #[error("{}:{line}: invalid callback event: {source}", .path.display())]
  EventLine {
    path: PathBuf,
    line: usize,
    #[source]
    source: serde_json::Error,
  },
  #[error("replay task failed: {0}")]
  Join(String),
}

impl TraceError {
  pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    TraceError::Io {
      path: path.into(),
      source,
    }
  }

  pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
    TraceError::Json {
      path: path.into(),
      source,
    }
  }
}
