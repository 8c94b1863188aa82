//! # Address Extraction & Ordering
//!
//! Free-form tool output (dig answers, whois blobs, scanner banners) is
//! scanned for IPv4 dotted-quad and IPv6 colon-hex literals. Candidates
//! that fail to parse are expected noise and dropped silently; candidates
//! that parse but are private, loopback or link-local are dropped too, so
//! the aggregate address set only ever holds routable addresses.

use std::collections::HashSet;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::OnceLock;

use regex::Regex;

static IPV4_RE: OnceLock<Regex> = OnceLock::new();
static IPV6_RE: OnceLock<Regex> = OnceLock::new();

fn ipv4_re() -> &'static Regex {
    IPV4_RE.get_or_init(|| Regex::new(r"\b(?:\d{1,3}\.){3}\d{1,3}\b").unwrap())
}

fn ipv6_re() -> &'static Regex {
    // Deliberately loose: anything colon-hex shaped is a candidate and the
    // parser is the actual validator (timestamps like 12:30:45 fail to parse).
    IPV6_RE.get_or_init(|| Regex::new(r"(?:[0-9a-fA-F]{0,4}:){2,7}[0-9a-fA-F]{0,4}").unwrap())
}

/// Scans arbitrary text for address literals and returns the deduplicated
/// set of routable addresses found. Deterministic for a given input.
pub fn extract_addresses(text: &str) -> HashSet<IpAddr> {
    let mut found: HashSet<IpAddr> = HashSet::new();

    for m in ipv4_re().find_iter(text) {
        if let Ok(ip) = m.as_str().parse::<Ipv4Addr>() {
            found.insert(IpAddr::V4(ip));
        }
    }

    for m in ipv6_re().find_iter(text) {
        if let Ok(ip) = m.as_str().parse::<Ipv6Addr>() {
            found.insert(IpAddr::V6(ip));
        }
    }

    found.retain(is_routable);
    found
}

/// Whether an address may enter the aggregate set: public unicast only.
pub fn is_routable(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            !(v4.is_private()
                || v4.is_loopback()
                || v4.is_link_local()
                || v4.is_unspecified()
                || v4.is_broadcast())
        }
        IpAddr::V6(v6) => {
            !(v6.is_loopback()
                || v6.is_unspecified()
                || v6.is_unique_local()
                || v6.is_unicast_link_local())
        }
    }
}

/// Deterministic ordering applied before persistence or scanning:
/// IPv4 addresses in numeric ascending order, then IPv6 likewise.
pub fn sort_addresses(addrs: &HashSet<IpAddr>) -> Vec<IpAddr> {
    let mut v4: Vec<Ipv4Addr> = Vec::new();
    let mut v6: Vec<Ipv6Addr> = Vec::new();

    for ip in addrs {
        match ip {
            IpAddr::V4(a) => v4.push(*a),
            IpAddr::V6(a) => v6.push(*a),
        }
    }

    v4.sort_unstable_by_key(|a| u32::from(*a));
    v6.sort_unstable_by_key(|a| u128::from(*a));

    v4.into_iter()
        .map(IpAddr::V4)
        .chain(v6.into_iter().map(IpAddr::V6))
        .collect()
}
