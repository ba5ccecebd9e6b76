//! Errors surfaced by the trace replay driver.

use std::io;

use memsim_core::common::ConfigError;
use thiserror::Error;

/// A malformed trace line.
#[derive(Debug, Error)]
#[error("trace line {line}: {reason}")]
pub struct TraceError {
    /// 1-based line number.
    pub line: usize,
    /// What was wrong with it.
    pub reason: String,
}

/// Anything that stops a replay.
#[derive(Debug, Error)]
pub enum MemsimError {
    /// Rejected configuration.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Malformed trace.
    #[error(transparent)]
    Trace(#[from] TraceError),

    /// Unreadable trace or config file, or failed report write.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// Malformed JSON configuration, or failed JSON report.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
