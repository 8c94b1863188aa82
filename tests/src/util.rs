//! Scripted stand-in for the external-tool boundary. Each test supplies
//! a closure mapping an argv to the text its backend would have printed.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use sweepr_common::error::ToolError;
use sweepr_core::invoke::ToolInvoker;

type Script = dyn Fn(&[String]) -> Result<String, ToolError> + Send + Sync;

pub struct FakeInvoker {
    script: Box<Script>,
    calls: AtomicUsize,
}

impl FakeInvoker {
    pub fn new(
        script: impl Fn(&[String]) -> Result<String, ToolError> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            script: Box::new(script),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ToolInvoker for FakeInvoker {
    async fn invoke(
        &self,
        argv: &[String],
        _timeout: Option<Duration>,
    ) -> Result<String, ToolError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.script)(argv)
    }
}

/// True when the argv is a reverse (PTR) lookup.
pub fn is_reverse_query(argv: &[String]) -> bool {
    argv.first().is_some_and(|p| p == "dig") && argv.contains(&"-x".to_string())
}
