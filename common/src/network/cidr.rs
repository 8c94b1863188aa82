//! CIDR ranges collected from registry lookups.
//!
//! Ranges are normalized to their canonical network address on parse, so
//! `203.0.113.7/24` and `203.0.113.0/24` are the same [`CidrRange`] and a
//! set of ranges deduplicates properly across ASNs.

use std::cmp::Ordering;
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use anyhow::Context;
use ipnetwork::{IpNetwork, Ipv4Network, Ipv6Network};

/// A validated network prefix (canonical network address + prefix length).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CidrRange(IpNetwork);

impl CidrRange {
    /// Number of usable host addresses the range expands to. IPv4 network
    /// and broadcast addresses are excluded for prefixes of /30 and wider;
    /// IPv6 has no broadcast so the full size counts. `u128` because IPv6
    /// prefixes overflow anything smaller.
    pub fn host_count(&self) -> u128 {
        match self.0 {
            IpNetwork::V4(net) if net.prefix() <= 30 => u128::from(net.size()) - 2,
            IpNetwork::V4(net) => u128::from(net.size()),
            IpNetwork::V6(net) => net.size(),
        }
    }

    /// Expands the range into its usable host addresses. Callers must
    /// check [`host_count`](Self::host_count) against their safety cap
    /// first; this allocates the whole list.
    pub fn hosts(&self) -> Vec<IpAddr> {
        match self.0 {
            IpNetwork::V4(net) if net.prefix() <= 30 => {
                let network = net.network();
                let broadcast = net.broadcast();
                net.iter()
                    .filter(|a| *a != network && *a != broadcast)
                    .map(IpAddr::V4)
                    .collect()
            }
            IpNetwork::V4(net) => net.iter().map(IpAddr::V4).collect(),
            IpNetwork::V6(net) => net.iter().map(IpAddr::V6).collect(),
        }
    }

    pub fn is_ipv4(&self) -> bool {
        matches!(self.0, IpNetwork::V4(_))
    }
}

impl fmt::Display for CidrRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0.ip(), self.0.prefix())
    }
}

impl FromStr for CidrRange {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // ipnetwork accepts a bare address as a full-prefix network; a CIDR
        // here must spell out its prefix.
        anyhow::ensure!(s.contains('/'), "invalid CIDR (missing prefix): {s}");

        let net: IpNetwork = s
            .trim()
            .parse()
            .with_context(|| format!("invalid CIDR: {s}"))?;

        // Canonicalize to the network address.
        let canonical = match net {
            IpNetwork::V4(v4) => IpNetwork::V4(Ipv4Network::new(v4.network(), v4.prefix())?),
            IpNetwork::V6(v6) => IpNetwork::V6(Ipv6Network::new(v6.network(), v6.prefix())?),
        };

        Ok(CidrRange(canonical))
    }
}

// Deterministic persistence order: IPv4 ranges first, then IPv6, each by
// network address then prefix.
impl Ord for CidrRange {
    fn cmp(&self, other: &Self) -> Ordering {
        let key = |r: &CidrRange| (r.0.is_ipv6(), r.0.ip(), r.0.prefix());
        key(self).cmp(&key(other))
    }
}

impl PartialOrd for CidrRange {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonicalizes_network() {
        let a: CidrRange = "203.0.113.7/24".parse().unwrap();
        let b: CidrRange = "203.0.113.0/24".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "203.0.113.0/24");
    }

    #[test]
    fn test_host_count() {
        let small: CidrRange = "203.0.113.0/30".parse().unwrap();
        assert_eq!(small.host_count(), 2);

        let single: CidrRange = "203.0.113.5/32".parse().unwrap();
        assert_eq!(single.host_count(), 1);

        let slash8: CidrRange = "10.0.0.0/8".parse().unwrap();
        assert_eq!(slash8.host_count(), (1 << 24) - 2);

        let v6: CidrRange = "2001:db8::/64".parse().unwrap();
        assert_eq!(v6.host_count(), 1u128 << 64);
    }

    #[test]
    fn test_hosts_excludes_network_and_broadcast() {
        let net: CidrRange = "203.0.113.0/30".parse().unwrap();
        let hosts = net.hosts();
        assert_eq!(hosts.len(), 2);
        assert_eq!(hosts[0], "203.0.113.1".parse::<IpAddr>().unwrap());
        assert_eq!(hosts[1], "203.0.113.2".parse::<IpAddr>().unwrap());

        let point: CidrRange = "203.0.113.0/31".parse().unwrap();
        assert_eq!(point.hosts().len(), 2);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!("no-slash".parse::<CidrRange>().is_err());
        assert!("203.0.113.0/33".parse::<CidrRange>().is_err());
        assert!("203.0.113.0".parse::<CidrRange>().is_err());
    }

    #[test]
    fn test_ordering_v4_before_v6() {
        let mut v = vec![
            "2001:db8::/48".parse::<CidrRange>().unwrap(),
            "198.51.100.0/24".parse::<CidrRange>().unwrap(),
            "192.0.2.0/24".parse::<CidrRange>().unwrap(),
        ];
        v.sort();
        assert_eq!(v[0].to_string(), "192.0.2.0/24");
        assert_eq!(v[1].to_string(), "198.51.100.0/24");
        assert_eq!(v[2].to_string(), "2001:db8::/48");
    }
}
