use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use crate::network::cidr::CidrRange;

/// Which CIDRs the optional CIDR-scan phase should sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CidrSelection {
    /// Skip the CIDR scan entirely.
    #[default]
    None,
    /// Sweep every CIDR collected during the ASN phase.
    All,
    /// Sweep only the given ranges.
    Ranges(Vec<CidrRange>),
}

/// Immutable run configuration, threaded by reference into every
/// component that needs it. There is no process-wide mutable state;
/// anything tunable lives here and is fixed before the pipeline starts.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Run the reverse-DNS phase over the discovered address set.
    pub perform_reverse_dns: bool,
    /// Run the port-scan phase (requires root).
    pub perform_port_scan: bool,
    /// Scan the full port range instead of the standard set.
    pub full_port_scan: bool,
    /// CIDR-scan selection.
    pub cidr_scan: CidrSelection,
    /// Resolver used for reverse lookups.
    pub resolver: IpAddr,
    /// Cap on how many collected CIDRs are swept when `cidr_scan` is `All`.
    pub max_cidrs: Option<usize>,
    /// A CIDR expanding to more host addresses than this is skipped outright.
    pub max_addresses_per_cidr: usize,
    /// Concurrency cap for cheap network-bound lookups (DNS, whois).
    pub lookup_workers: usize,
    /// Concurrency cap for heavyweight per-host scanner invocations.
    pub scan_workers: usize,
    /// Addresses per batch when sweeping a CIDR.
    pub cidr_batch_size: usize,
    /// Hard bound on the bulk IPv4 port scan; the backend is killed on expiry.
    pub bulk_scan_timeout: Duration,
    /// Time bound applied to each individual lookup invocation.
    pub lookup_timeout: Duration,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            perform_reverse_dns: false,
            perform_port_scan: false,
            full_port_scan: false,
            cidr_scan: CidrSelection::None,
            resolver: IpAddr::V4(Ipv4Addr::new(1, 1, 1, 1)),
            max_cidrs: None,
            max_addresses_per_cidr: 4096,
            lookup_workers: 50,
            scan_workers: 10,
            cidr_batch_size: 500,
            bulk_scan_timeout: Duration::from_secs(3600),
            lookup_timeout: Duration::from_secs(20),
        }
    }
}
