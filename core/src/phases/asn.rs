//! # ASN Lookup & CIDR Collection Phases
//!
//! Per-address ASN resolution through the lookup pool, each worker
//! walking its fallback strategies privately, then a second pool run
//! querying the registry for every distinct ASN's announced prefixes.

use std::collections::{HashMap, HashSet};
use std::net::IpAddr;
use std::sync::Arc;

use sweepr_common::config::RunConfig;
use sweepr_common::error::ToolError;
use sweepr_common::network::cidr::CidrRange;
use sweepr_protocols::asn;
use tracing::debug;

use crate::invoke::ToolInvoker;
use crate::pool;
use crate::result::AsnRecord;

/// Resolves the owning ASN for every address. One address failing all
/// its strategies simply has no entry in the returned map.
pub async fn lookup(
    ips: Vec<IpAddr>,
    cfg: &RunConfig,
    invoker: &Arc<dyn ToolInvoker>,
) -> HashMap<IpAddr, AsnRecord> {
    let timeout = cfg.lookup_timeout;
    let outcomes = pool::run_all(ips, cfg.lookup_workers, |ip| {
        let invoker = Arc::clone(invoker);
        async move {
            for strategy in asn::asn_strategies(&ip) {
                match invoker.invoke(&strategy.argv, Some(timeout)).await {
                    Ok(text) => {
                        if let Some(answer) = (strategy.parse)(&text) {
                            return Ok(AsnRecord {
                                asn: answer.asn,
                                ip,
                                description: answer.description,
                            });
                        }
                    }
                    Err(e) => debug!(%ip, source = strategy.name, "ASN lookup failed: {e}"),
                }
            }
            Err(ToolError::Execution("no ASN data from any source".to_string()))
        }
    })
    .await;

    let mut info: HashMap<IpAddr, AsnRecord> = HashMap::new();
    for (ip, outcome) in outcomes {
        match outcome {
            Ok(record) => {
                info.insert(ip, record);
            }
            Err(e) => debug!(%ip, "no ASN coverage: {e}"),
        }
    }
    info
}

/// Queries the registry for every ASN's announced prefixes and unions
/// them. Retained even when CIDR scanning was not requested, so the list
/// can always be persisted for later use.
pub async fn collect_cidrs(
    asns: Vec<String>,
    cfg: &RunConfig,
    invoker: &Arc<dyn ToolInvoker>,
) -> HashSet<CidrRange> {
    let timeout = cfg.lookup_timeout;
    let outcomes = pool::run_all(asns, cfg.lookup_workers, |asn| {
        let invoker = Arc::clone(invoker);
        async move {
            let argv = asn::cidr_query(&asn);
            invoker.invoke(&argv, Some(timeout)).await
        }
    })
    .await;

    let mut cidrs: HashSet<CidrRange> = HashSet::new();
    for (asn, outcome) in outcomes {
        match outcome {
            Ok(text) => cidrs.extend(asn::parse_routes(&text)),
            Err(e) => debug!(%asn, "no prefixes from registry: {e}"),
        }
    }
    cidrs
}
