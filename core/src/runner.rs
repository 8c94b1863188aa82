//! # Command Runner
//!
//! Executes one external tool invocation with an optional time bound and
//! folds every way it can go wrong into [`ToolError`]. Nothing escapes
//! this boundary as a panic or an unstructured error; callers treat a
//! failure as "no data from this source" and move on.

use std::process::Stdio;
use std::time::Duration;

use sweepr_common::error::ToolError;
use tokio::process::Command;
use tracing::debug;

/// Runs `argv` to completion and returns its stdout.
///
/// The child's stdin is closed and stderr discarded. With a timeout set,
/// an overrunning process is killed and reaped before the error returns
/// (`kill_on_drop` covers the abandoned wait future). A non-zero exit
/// with usable stdout is tolerated: several of the tools we drive write
/// partial data and then exit unhappily.
pub async fn run(argv: &[String], timeout: Option<Duration>) -> Result<String, ToolError> {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| ToolError::Execution("empty command".to_string()))?;

    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ToolError::NotFound(program.clone()),
            _ => ToolError::Execution(e.to_string()),
        })?;

    let waited = match timeout {
        Some(bound) => match tokio::time::timeout(bound, child.wait_with_output()).await {
            Ok(res) => res,
            Err(_) => {
                debug!(%program, ?bound, "invocation timed out, process killed");
                return Err(ToolError::TimedOut(bound));
            }
        },
        None => child.wait_with_output().await,
    };

    let output = waited.map_err(|e| ToolError::Execution(e.to_string()))?;
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();

    if !output.status.success() && stdout.trim().is_empty() {
        return Err(ToolError::Execution(format!(
            "{program} exited with {}",
            output.status
        )));
    }

    Ok(stdout)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_captures_stdout() {
        let out = run(&argv(&["echo", "hello"]), None).await.unwrap();
        assert_eq!(out.trim(), "hello");
    }

    #[tokio::test]
    async fn test_missing_executable() {
        let err = run(&argv(&["definitely-not-a-real-tool-xyz"]), None)
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_timeout_kills_process() {
        let bound = Duration::from_millis(100);
        let err = run(&argv(&["sleep", "30"]), Some(bound)).await.unwrap_err();
        assert!(matches!(err, ToolError::TimedOut(_)));
    }

    #[tokio::test]
    async fn test_nonzero_exit_without_output_is_error() {
        let err = run(&argv(&["false"]), None).await.unwrap_err();
        assert!(matches!(err, ToolError::Execution(_)));
    }

    #[tokio::test]
    async fn test_nonzero_exit_with_output_is_tolerated() {
        let out = run(&argv(&["sh", "-c", "echo partial; exit 3"]), None)
            .await
            .unwrap();
        assert_eq!(out.trim(), "partial");
    }

    #[tokio::test]
    async fn test_empty_argv() {
        let err = run(&[], None).await.unwrap_err();
        assert!(matches!(err, ToolError::Execution(_)));
    }
}
