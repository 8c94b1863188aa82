//! # Port Scan Backends
//!
//! Two nmap invocation shapes: one bulk run covering every IPv4 target,
//! and one run per IPv6 host. Output parsing here is limited to pulling
//! live addresses back out of the report, since the scanner may surface
//! hosts beyond the input list.

use std::collections::HashSet;
use std::net::IpAddr;

use sweepr_common::network::addr;

/// The standard port set scanned when a full sweep was not requested.
const STANDARD_PORTS: &str =
    "21,22,23,25,53,80,110,111,135,139,143,443,445,465,587,993,995,1723,3306,3389,5432,5900,8080,8443";

/// One bulk invocation covering all IPv4 targets.
pub fn bulk_ipv4(targets: &[IpAddr], full_scan: bool) -> Vec<String> {
    let mut argv = base_argv(full_scan);
    argv.extend(targets.iter().map(|ip| ip.to_string()));
    argv
}

/// One invocation for a single IPv6 host.
pub fn per_host_ipv6(target: &IpAddr, full_scan: bool) -> Vec<String> {
    let mut argv = base_argv(full_scan);
    argv.insert(1, "-6".to_string());
    argv.push(target.to_string());
    argv
}

fn base_argv(full_scan: bool) -> Vec<String> {
    let mut argv = vec![
        "nmap".to_string(),
        "-sS".to_string(),
        "-Pn".to_string(),
        "-T4".to_string(),
    ];
    if full_scan {
        argv.push("-p-".to_string());
    } else {
        argv.push("-p".to_string());
        argv.push(STANDARD_PORTS.to_string());
    }
    argv
}

/// Addresses the scanner reported as live. Routable-only, same contract
/// as the rest of the aggregate address set.
pub fn parse_live_hosts(text: &str) -> HashSet<IpAddr> {
    addr::extract_addresses(text)
}
