use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use sweepr_common::config::{CidrSelection, RunConfig};
use sweepr_common::network::cidr::CidrRange;

#[derive(Parser)]
#[command(name = "sweepr")]
#[command(about = "Concurrent domain reconnaissance: DNS, certificates, ASN, CIDR and port sweeps.")]
pub struct CommandLine {
    /// Target domain (e.g. example.com)
    pub target: String,

    /// Output directory (defaults to ./sweepr-<domain>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Reverse-resolve every discovered address
    #[arg(long)]
    pub reverse_dns: bool,

    /// Port-scan discovered addresses (requires root)
    #[arg(long)]
    pub port_scan: bool,

    /// Scan the full port range instead of the standard set
    #[arg(long, requires = "port_scan")]
    pub full_port_scan: bool,

    /// Reverse-sweep collected CIDRs: "all" or a comma-separated list
    #[arg(long, value_name = "all|CIDR,...")]
    pub scan_cidrs: Option<String>,

    /// Resolver used for reverse lookups
    #[arg(long, default_value = "1.1.1.1")]
    pub resolver: IpAddr,

    /// Cap on how many collected CIDRs get swept with --scan-cidrs all
    #[arg(long)]
    pub max_cidrs: Option<usize>,

    /// Skip any CIDR expanding to more host addresses than this
    #[arg(long, default_value_t = 4096)]
    pub max_cidr_hosts: usize,

    /// Concurrency cap for lookup workers
    #[arg(long, default_value_t = 50)]
    pub workers: usize,

    /// Concurrency cap for per-host scanner workers
    #[arg(long, default_value_t = 10)]
    pub scan_workers: usize,

    /// Per-lookup timeout in seconds
    #[arg(long, default_value_t = 20)]
    pub lookup_timeout: u64,

    /// Overall bulk port-scan timeout in seconds
    #[arg(long, default_value_t = 3600)]
    pub bulk_scan_timeout: u64,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn to_config(&self) -> anyhow::Result<RunConfig> {
        Ok(RunConfig {
            perform_reverse_dns: self.reverse_dns,
            perform_port_scan: self.port_scan,
            full_port_scan: self.full_port_scan,
            cidr_scan: parse_cidr_selection(self.scan_cidrs.as_deref())?,
            resolver: self.resolver,
            max_cidrs: self.max_cidrs,
            max_addresses_per_cidr: self.max_cidr_hosts,
            lookup_workers: self.workers,
            scan_workers: self.scan_workers,
            cidr_batch_size: 500,
            bulk_scan_timeout: Duration::from_secs(self.bulk_scan_timeout),
            lookup_timeout: Duration::from_secs(self.lookup_timeout),
        })
    }
}

fn parse_cidr_selection(arg: Option<&str>) -> anyhow::Result<CidrSelection> {
    let Some(arg) = arg else {
        return Ok(CidrSelection::None);
    };

    if arg.eq_ignore_ascii_case("all") {
        return Ok(CidrSelection::All);
    }

    let ranges: Vec<CidrRange> = arg
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<CidrRange>())
        .collect::<Result<_, _>>()
        .context("parsing --scan-cidrs")?;

    Ok(CidrSelection::Ranges(ranges))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cidr_selection_parsing() {
        assert_eq!(parse_cidr_selection(None).unwrap(), CidrSelection::None);
        assert_eq!(parse_cidr_selection(Some("ALL")).unwrap(), CidrSelection::All);

        let sel = parse_cidr_selection(Some("203.0.113.0/24, 198.51.100.0/28")).unwrap();
        match sel {
            CidrSelection::Ranges(ranges) => assert_eq!(ranges.len(), 2),
            other => panic!("unexpected selection: {other:?}"),
        }

        assert!(parse_cidr_selection(Some("bogus")).is_err());
    }
}
