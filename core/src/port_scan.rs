//! # Dual-Path Port Scan Coordinator
//!
//! IPv4 targets go to the scanner as one bulk invocation; IPv6 targets
//! fan out one invocation per host through the smaller pool. The two
//! paths run concurrently and the coordinator returns only after both
//! finish. The bulk path is the single place in the pipeline with a
//! whole-operation timeout: the backend is killed when it expires.
//!
//! Scan reports can name live hosts beyond the input list; those are
//! returned so the pipeline can fold them back into the persisted
//! address set — the one case where a later phase enriches earlier
//! state.

use std::collections::HashSet;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use sweepr_common::config::RunConfig;
use sweepr_common::network::addr;
use sweepr_protocols::portscan;
use tracing::{info, warn};

use crate::invoke::ToolInvoker;
use crate::pool;
use crate::store::ReconStore;
use crate::ticker::ProgressTicker;

const PROGRESS_PERIOD: Duration = Duration::from_secs(15);

/// Scans every address and returns the set of live hosts the backends
/// reported (routable-only, may exceed the input set).
pub async fn scan(
    ips: &HashSet<IpAddr>,
    cfg: &RunConfig,
    invoker: &Arc<dyn ToolInvoker>,
    store: &ReconStore,
) -> anyhow::Result<HashSet<IpAddr>> {
    let mut v4: Vec<IpAddr> = Vec::new();
    let mut v6: Vec<IpAddr> = Vec::new();
    for ip in addr::sort_addresses(ips) {
        match ip {
            IpAddr::V4(_) => v4.push(ip),
            IpAddr::V6(_) => v6.push(ip),
        }
    }

    let bulk_path = bulk_ipv4_scan(&v4, cfg, invoker, store);
    let per_host_path = per_host_ipv6_scan(&v6, cfg, invoker, store);

    // Fan-in barrier for both backends; neither path cancels the other.
    let (bulk, per_host) = tokio::join!(bulk_path, per_host_path);

    let mut discovered = bulk?;
    discovered.extend(per_host?);
    Ok(discovered)
}

async fn bulk_ipv4_scan(
    targets: &[IpAddr],
    cfg: &RunConfig,
    invoker: &Arc<dyn ToolInvoker>,
    store: &ReconStore,
) -> anyhow::Result<HashSet<IpAddr>> {
    if targets.is_empty() {
        return Ok(HashSet::new());
    }

    info!(targets = targets.len(), "starting bulk IPv4 port scan");
    let ticker = ProgressTicker::spawn(PROGRESS_PERIOD, |n| {
        info!(
            elapsed_s = n * PROGRESS_PERIOD.as_secs(),
            "bulk IPv4 scan still running"
        );
    });

    let argv = portscan::bulk_ipv4(targets, cfg.full_port_scan);
    let outcome = invoker.invoke(&argv, Some(cfg.bulk_scan_timeout)).await;
    ticker.stop().await;

    match outcome {
        Ok(text) => {
            store.write_scan_output("portscan_ipv4", &text)?;
            Ok(portscan::parse_live_hosts(&text))
        }
        Err(e) => {
            // Backend failure is not a pipeline failure; the run carries
            // on with whatever the other path produces.
            warn!("bulk IPv4 scan produced no output: {e}");
            Ok(HashSet::new())
        }
    }
}

async fn per_host_ipv6_scan(
    targets: &[IpAddr],
    cfg: &RunConfig,
    invoker: &Arc<dyn ToolInvoker>,
    store: &ReconStore,
) -> anyhow::Result<HashSet<IpAddr>> {
    if targets.is_empty() {
        return Ok(HashSet::new());
    }

    info!(targets = targets.len(), "starting per-host IPv6 scans");
    let full_scan = cfg.full_port_scan;
    let timeout = cfg.bulk_scan_timeout;

    let outcomes = pool::run_all(targets.to_vec(), cfg.scan_workers, |ip| {
        let invoker = Arc::clone(invoker);
        async move {
            let argv = portscan::per_host_ipv6(&ip, full_scan);
            invoker.invoke(&argv, Some(timeout)).await
        }
    })
    .await;

    let mut discovered: HashSet<IpAddr> = HashSet::new();
    for (ip, outcome) in outcomes {
        match outcome {
            Ok(text) => {
                let name = format!("portscan_{}", ip.to_string().replace(':', "_"));
                store.write_scan_output(&name, &text)?;
                discovered.extend(portscan::parse_live_hosts(&text));
            }
            Err(e) => warn!(%ip, "IPv6 scan produced no output: {e}"),
        }
    }
    Ok(discovered)
}
