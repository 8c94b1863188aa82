//! The seam between the orchestration engine and the outside world.
//!
//! Every external capability — DNS queries, certificate pulls, whois,
//! port scans — reaches the system through [`ToolInvoker`]. The engine
//! never cares which tool is behind an argv, only that invoking it
//! yields text or a [`ToolError`]. Tests substitute scripted fakes here.

use std::time::Duration;

use async_trait::async_trait;
use sweepr_common::error::ToolError;

use crate::runner;

#[async_trait]
pub trait ToolInvoker: Send + Sync {
    async fn invoke(&self, argv: &[String], timeout: Option<Duration>)
    -> Result<String, ToolError>;
}

/// The real thing: spawns the external process through the command runner.
pub struct ProcessInvoker;

#[async_trait]
impl ToolInvoker for ProcessInvoker {
    async fn invoke(
        &self,
        argv: &[String],
        timeout: Option<Duration>,
    ) -> Result<String, ToolError> {
        runner::run(argv, timeout).await
    }
}
