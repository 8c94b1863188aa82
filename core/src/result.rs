//! The accumulating aggregate threaded through the pipeline, and the
//! run-level counters reported at the end.

use std::collections::{HashMap, HashSet};
use std::net::IpAddr;
use std::time::Duration;

/// One ASN record per address that yielded ASN data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsnRecord {
    pub asn: String,
    pub ip: IpAddr,
    pub description: String,
}

/// Everything the phases have discovered so far. Phases only ever add;
/// nothing is removed once merged. Mutation happens exclusively at a
/// phase's fan-in step — workers compute privately and the merge is
/// serialized by construction (the pool has already joined).
#[derive(Debug, Default)]
pub struct PhaseResult {
    pub ips: HashSet<IpAddr>,
    pub asn_info: HashMap<IpAddr, AsnRecord>,
    pub ssl_domains: HashSet<String>,
    pub reverse_dns: HashMap<IpAddr, Vec<String>>,
}

impl PhaseResult {
    pub fn merge_ips(&mut self, found: impl IntoIterator<Item = IpAddr>) {
        self.ips.extend(found);
    }

    pub fn merge_domains(&mut self, found: impl IntoIterator<Item = String>) {
        self.ssl_domains.extend(found);
    }

    /// Distinct ASNs seen so far, sorted for deterministic iteration.
    pub fn distinct_asns(&self) -> Vec<String> {
        let mut asns: Vec<String> = self
            .asn_info
            .values()
            .map(|rec| rec.asn.clone())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        asns.sort();
        asns
    }
}

/// Aggregate counts for the final summary. Partial failure is silent per
/// task, so these numbers are how a user notices a degraded run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub addresses: usize,
    pub ssl_domains: usize,
    pub asn_covered: usize,
    pub reverse_dns_covered: usize,
    pub cidrs_collected: usize,
    pub cidrs_scanned: usize,
    pub scan_discovered: usize,
    pub elapsed: Duration,
}
