//! # CIDR Batch Scanner
//!
//! Sweeps collected CIDRs with reverse lookups. CIDRs are processed
//! strictly one at a time; parallelism lives only inside each
//! fixed-size batch, which bounds peak concurrency and memory no matter
//! how large the range list is. A range expanding past the configured
//! address cap is skipped outright — a /8 typed by accident must not
//! melt the resolver.

use std::collections::{BTreeMap, HashMap};
use std::net::IpAddr;
use std::sync::Arc;

use sweepr_common::config::RunConfig;
use sweepr_common::network::cidr::CidrRange;
use tracing::{info, warn};

use crate::invoke::ToolInvoker;
use crate::phases::rdns;
use crate::store::ReconStore;

/// Sweeps each CIDR and returns the per-CIDR reverse-DNS maps. Every
/// CIDR's map is persisted as soon as that CIDR completes, so results
/// for earlier ranges survive a crash during a later one.
pub async fn scan(
    cidrs: &[CidrRange],
    cfg: &RunConfig,
    invoker: &Arc<dyn ToolInvoker>,
    store: &ReconStore,
) -> anyhow::Result<BTreeMap<CidrRange, HashMap<IpAddr, Vec<String>>>> {
    let mut results: BTreeMap<CidrRange, HashMap<IpAddr, Vec<String>>> = BTreeMap::new();
    let batch_size = cfg.cidr_batch_size.max(1);

    for cidr in cidrs {
        let count = cidr.host_count();
        if count > cfg.max_addresses_per_cidr as u128 {
            warn!(
                %cidr, count,
                cap = cfg.max_addresses_per_cidr,
                "CIDR exceeds address cap, skipping"
            );
            continue;
        }

        let hosts = cidr.hosts();
        let mut map: HashMap<IpAddr, Vec<String>> = HashMap::new();

        for batch in hosts.chunks(batch_size) {
            let batch_map =
                rdns::sweep(batch.to_vec(), cfg.lookup_workers, cfg, invoker).await;
            map.extend(batch_map);
        }

        info!(%cidr, resolved = map.len(), swept = hosts.len(), "CIDR sweep complete");
        store.write_cidr_reverse_dns(cidr, &map)?;
        results.insert(*cidr, map);
    }

    Ok(results)
}
