//! # DNS Recon Phase
//!
//! Fires the full query battery (record types through two resolver
//! tools, plus wordlist brute force) for one or more domains through the
//! lookup pool, and feeds every answer through the address extractor.
//! A failed query contributes nothing; it never aborts the batch.

use std::collections::HashSet;
use std::net::IpAddr;
use std::sync::Arc;

use sweepr_common::config::RunConfig;
use sweepr_common::network::addr;
use sweepr_protocols::dns;
use tracing::debug;

use crate::invoke::ToolInvoker;
use crate::pool;

/// Runs the battery for every domain in `domains` concurrently and
/// returns the union of routable addresses found. Used for the target
/// itself and re-used wholesale for SAN resolution, where the batteries
/// of all SAN domains are flattened into one pool run.
pub async fn recon(
    domains: &[String],
    cfg: &RunConfig,
    invoker: &Arc<dyn ToolInvoker>,
) -> HashSet<IpAddr> {
    let mut battery: Vec<Vec<String>> = Vec::new();
    for domain in domains {
        battery.extend(dns::query_battery(domain));
    }

    let timeout = cfg.lookup_timeout;
    let outcomes = pool::run_all(battery, cfg.lookup_workers, |argv| {
        let invoker = Arc::clone(invoker);
        async move { invoker.invoke(&argv, Some(timeout)).await }
    })
    .await;

    let mut ips: HashSet<IpAddr> = HashSet::new();
    for (argv, outcome) in outcomes {
        match outcome {
            Ok(text) => ips.extend(addr::extract_addresses(&text)),
            Err(e) => debug!(query = %argv.join(" "), "lookup contributed nothing: {e}"),
        }
    }
    ips
}
