//! # Certificate SAN Discovery Phase
//!
//! Walks the ordered SAN strategies and stops at the first one that
//! yields a non-empty set. All strategies failing or coming back empty
//! is a normal outcome (no certificate, nothing in the logs).

use std::collections::HashSet;
use std::sync::Arc;

use sweepr_common::config::RunConfig;
use sweepr_protocols::cert;
use tracing::{debug, info};

use crate::invoke::ToolInvoker;

pub async fn discover_sans(
    domain: &str,
    cfg: &RunConfig,
    invoker: &Arc<dyn ToolInvoker>,
) -> HashSet<String> {
    for strategy in cert::san_strategies(domain) {
        match invoker.invoke(&strategy.argv, Some(cfg.lookup_timeout)).await {
            Ok(text) => {
                let sans = (strategy.parse)(&text);
                if !sans.is_empty() {
                    info!(
                        source = strategy.name,
                        count = sans.len(),
                        "certificate SANs discovered"
                    );
                    return sans;
                }
                debug!(source = strategy.name, "no SANs from this source");
            }
            Err(e) => debug!(source = strategy.name, "SAN lookup failed: {e}"),
        }
    }
    HashSet::new()
}
