//! # Phase Pipeline
//!
//! Sequences the reconnaissance phases against one target, threading the
//! accumulating [`PhaseResult`] through them. Phases are strictly
//! sequential; only the work inside a phase is concurrent, and no phase
//! starts reading the aggregate before the previous phase's fan-in has
//! completed. Each phase persists through the store hook right after its
//! merge, so every completed phase's data is already on disk when the
//! next one begins.

use std::sync::Arc;
use std::time::Instant;

use sweepr_common::config::{CidrSelection, RunConfig};
use sweepr_common::network::addr;
use sweepr_common::network::cidr::CidrRange;
use sweepr_common::network::target::Domain;
use tracing::info;

use crate::invoke::ToolInvoker;
use crate::phases::{asn, cert, dns, rdns};
use crate::result::{PhaseResult, RunSummary};
use crate::store::ReconStore;
use crate::{cidr_scan, port_scan};

/// Runs the whole pipeline. Per-task failures never surface here; the
/// only errors that propagate are persistence failures.
pub async fn run(
    target: &Domain,
    cfg: &RunConfig,
    invoker: Arc<dyn ToolInvoker>,
    store: &ReconStore,
) -> anyhow::Result<(PhaseResult, RunSummary)> {
    let started = Instant::now();
    let mut result = PhaseResult::default();
    let mut summary = RunSummary::default();

    // 1. DNS recon against the target itself.
    info!(%target, "phase 1: DNS reconnaissance");
    let found = dns::recon(&[target.to_string()], cfg, &invoker).await;
    result.merge_ips(found);
    store.write_addresses(&result.ips)?;
    info!(addresses = result.ips.len(), "DNS recon complete");

    // 2. Certificate SAN discovery.
    info!("phase 2: certificate SAN discovery");
    let sans = cert::discover_sans(target.as_str(), cfg, &invoker).await;
    result.merge_domains(sans);
    store.write_ssl_domains(&result.ssl_domains)?;

    // 3. Resolve every SAN other than the target, one flattened pool run.
    let other_sans: Vec<String> = result
        .ssl_domains
        .iter()
        .filter(|d| d.as_str() != target.as_str())
        .cloned()
        .collect();
    if !other_sans.is_empty() {
        info!(domains = other_sans.len(), "phase 3: resolving SAN domains");
        let found = dns::recon(&other_sans, cfg, &invoker).await;
        result.merge_ips(found);
        store.write_addresses(&result.ips)?;
    }

    // 4. ASN lookup per address.
    info!(addresses = result.ips.len(), "phase 4: ASN lookups");
    let sorted = addr::sort_addresses(&result.ips);
    result.asn_info = asn::lookup(sorted, cfg, &invoker).await;
    store.write_asn_map(&result.asn_info)?;

    // 5. CIDR collection per distinct ASN. Always persisted, even when no
    // CIDR scan was requested.
    info!("phase 5: CIDR collection");
    let cidrs = asn::collect_cidrs(result.distinct_asns(), cfg, &invoker).await;
    store.write_cidrs(&cidrs)?;
    summary.cidrs_collected = cidrs.len();

    // 6. Reverse DNS (optional).
    if cfg.perform_reverse_dns {
        info!("phase 6: reverse DNS sweep");
        let sorted = addr::sort_addresses(&result.ips);
        result.reverse_dns = rdns::sweep(sorted, cfg.lookup_workers, cfg, &invoker).await;
        store.write_reverse_dns(&result.reverse_dns)?;
    }

    // 7. CIDR scan (optional).
    let selected = select_cidrs(&cidrs, cfg);
    if !selected.is_empty() {
        info!(cidrs = selected.len(), "phase 7: CIDR reverse sweeps");
        let swept = cidr_scan::scan(&selected, cfg, &invoker, store).await?;
        summary.cidrs_scanned = swept.len();
    }

    // 8. Port scan (optional). Scanner-reported hosts fold back into the
    // persisted address list.
    if cfg.perform_port_scan && !result.ips.is_empty() {
        info!(addresses = result.ips.len(), "phase 8: port scanning");
        let discovered = port_scan::scan(&result.ips, cfg, &invoker, store).await?;
        let new: Vec<_> = discovered
            .iter()
            .filter(|ip| !result.ips.contains(ip))
            .copied()
            .collect();
        if !new.is_empty() {
            info!(count = new.len(), "scanner revealed additional live hosts");
            summary.scan_discovered = new.len();
            result.merge_ips(new);
            store.write_addresses(&result.ips)?;
        }
    }

    summary.addresses = result.ips.len();
    summary.ssl_domains = result.ssl_domains.len();
    summary.asn_covered = result.asn_info.len();
    summary.reverse_dns_covered = result.reverse_dns.len();
    summary.elapsed = started.elapsed();

    Ok((result, summary))
}

/// Applies the CIDR-scan selection, in deterministic order. The
/// `max_cidrs` cap only constrains the "all collected" case; explicitly
/// listed ranges are taken as given.
fn select_cidrs(
    collected: &std::collections::HashSet<CidrRange>,
    cfg: &RunConfig,
) -> Vec<CidrRange> {
    match &cfg.cidr_scan {
        CidrSelection::None => Vec::new(),
        CidrSelection::Ranges(ranges) => ranges.clone(),
        CidrSelection::All => {
            let mut sorted: Vec<CidrRange> = collected.iter().copied().collect();
            sorted.sort();
            if let Some(cap) = cfg.max_cidrs {
                sorted.truncate(cap);
            }
            sorted
        }
    }
}
