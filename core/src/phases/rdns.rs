//! # Reverse DNS Phase
//!
//! One PTR lookup per address through the pool. Addresses with empty
//! answers are omitted from the map entirely; answer order within one
//! address is the resolver's order. Deterministic for a fixed resolver:
//! running the sweep twice yields the same map.

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;

use sweepr_common::config::RunConfig;
use sweepr_protocols::dns;
use tracing::debug;

use crate::invoke::ToolInvoker;
use crate::pool;

/// Sweeps `ips` with `workers` concurrent lookups. The worker cap is a
/// parameter (not read from config directly) because the CIDR batch
/// scanner re-uses this sweep per batch.
pub async fn sweep(
    ips: Vec<IpAddr>,
    workers: usize,
    cfg: &RunConfig,
    invoker: &Arc<dyn ToolInvoker>,
) -> HashMap<IpAddr, Vec<String>> {
    let resolver = cfg.resolver;
    let timeout = cfg.lookup_timeout;

    let outcomes = pool::run_all(ips, workers, |ip| {
        let invoker = Arc::clone(invoker);
        async move {
            let argv = dns::reverse_query(&ip, &resolver);
            invoker.invoke(&argv, Some(timeout)).await
        }
    })
    .await;

    let mut map: HashMap<IpAddr, Vec<String>> = HashMap::new();
    for (ip, outcome) in outcomes {
        match outcome {
            Ok(text) => {
                let names = dns::parse_ptr_answer(&text);
                if !names.is_empty() {
                    map.insert(ip, names);
                }
            }
            Err(e) => debug!(%ip, "reverse lookup contributed nothing: {e}"),
        }
    }
    map
}
