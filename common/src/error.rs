//! # Failure Taxonomy
//!
//! Two disjoint error families, mirroring the two ways a run can go wrong:
//!
//! * [`SetupError`] — fatal preconditions checked before the pipeline
//!   starts. The pipeline never begins when one of these fires.
//! * [`ToolError`] — the outcome of a single external-tool invocation.
//!   Never fatal: the fan-in step folds it into "no contribution from
//!   this task" and the phase continues.

use std::time::Duration;
use thiserror::Error;

/// Fatal pre-pipeline errors. Reported to the user, exit non-zero.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("invalid target domain: {0}")]
    InvalidTarget(String),

    #[error("insufficient privilege: {0}")]
    MissingPrivilege(&'static str),
}

/// The single failure type for one external-tool invocation.
///
/// Callers treat every variant the same way — the task contributed
/// nothing — but the variants keep logs diagnosable.
#[derive(Debug, Clone, Error)]
pub enum ToolError {
    /// The executable could not be found on this system.
    #[error("executable not found: {0}")]
    NotFound(String),

    /// The invocation exceeded its time bound and was killed.
    #[error("timed out after {0:?}")]
    TimedOut(Duration),

    /// The process spawned but failed to produce usable output.
    #[error("execution failed: {0}")]
    Execution(String),
}
