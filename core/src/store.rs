//! # Result Store
//!
//! Owns the on-disk layout for a run and the write contract every phase
//! persists through. Each hook rewrites its whole file from the current
//! aggregate, sorted deterministically, so a crash mid-run leaves every
//! completed phase's data intact and readable.
//!
//! Layout under the run directory:
//! ```text
//! hosts.txt           one address per line, v4 numeric asc then v6
//! ssl_domains.txt     discovered SAN domains, sorted
//! asn.txt             "ip | asn | description", ordered by ip
//! reverse_dns.txt     "ip hostname[,hostname...]", ordered by ip
//! cidrs.txt           collected prefixes, sorted
//! cidr_<range>.txt    per-CIDR reverse-DNS map ('/' becomes '_')
//! scan/<name>.txt     raw port-scan outputs
//! ```

use std::collections::{HashMap, HashSet};
use std::fs;
use std::net::IpAddr;
use std::path::{Path, PathBuf};

use anyhow::Context;
use sweepr_common::network::addr;
use sweepr_common::network::cidr::CidrRange;

use crate::result::AsnRecord;

pub struct ReconStore {
    root: PathBuf,
}

impl ReconStore {
    /// Creates the run directory (and `scan/` beneath it) if missing.
    pub fn create(root: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let root = root.into();
        fs::create_dir_all(root.join("scan"))
            .with_context(|| format!("creating output directory {}", root.display()))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn write_addresses(&self, ips: &HashSet<IpAddr>) -> anyhow::Result<()> {
        let lines: Vec<String> = addr::sort_addresses(ips)
            .iter()
            .map(|ip| ip.to_string())
            .collect();
        self.write_lines("hosts.txt", &lines)
    }

    pub fn write_ssl_domains(&self, domains: &HashSet<String>) -> anyhow::Result<()> {
        let mut lines: Vec<String> = domains.iter().cloned().collect();
        lines.sort();
        self.write_lines("ssl_domains.txt", &lines)
    }

    pub fn write_asn_map(&self, asn_info: &HashMap<IpAddr, AsnRecord>) -> anyhow::Result<()> {
        let keys: HashSet<IpAddr> = asn_info.keys().copied().collect();
        let lines: Vec<String> = addr::sort_addresses(&keys)
            .iter()
            .filter_map(|ip| asn_info.get(ip))
            .map(|rec| format!("{} | {} | {}", rec.ip, rec.asn, rec.description))
            .collect();
        self.write_lines("asn.txt", &lines)
    }

    pub fn write_reverse_dns(&self, map: &HashMap<IpAddr, Vec<String>>) -> anyhow::Result<()> {
        self.write_rdns_file("reverse_dns.txt", map)
    }

    pub fn write_cidrs(&self, cidrs: &HashSet<CidrRange>) -> anyhow::Result<()> {
        let mut sorted: Vec<CidrRange> = cidrs.iter().copied().collect();
        sorted.sort();
        let lines: Vec<String> = sorted.iter().map(|c| c.to_string()).collect();
        self.write_lines("cidrs.txt", &lines)
    }

    /// Persisted as soon as one CIDR's sweep completes, so earlier CIDRs
    /// survive a crash during a later one.
    pub fn write_cidr_reverse_dns(
        &self,
        cidr: &CidrRange,
        map: &HashMap<IpAddr, Vec<String>>,
    ) -> anyhow::Result<()> {
        let name = format!("cidr_{}.txt", cidr.to_string().replace('/', "_"));
        self.write_rdns_file(&name, map)
    }

    pub fn write_scan_output(&self, name: &str, text: &str) -> anyhow::Result<()> {
        let path = self.root.join("scan").join(format!("{name}.txt"));
        fs::write(&path, text).with_context(|| format!("writing {}", path.display()))
    }

    fn write_rdns_file(&self, name: &str, map: &HashMap<IpAddr, Vec<String>>) -> anyhow::Result<()> {
        let keys: HashSet<IpAddr> = map.keys().copied().collect();
        let lines: Vec<String> = addr::sort_addresses(&keys)
            .iter()
            .filter_map(|ip| map.get(ip).map(|names| (ip, names)))
            .map(|(ip, names)| format!("{ip} {}", names.join(",")))
            .collect();
        self.write_lines(name, &lines)
    }

    fn write_lines(&self, name: &str, lines: &[String]) -> anyhow::Result<()> {
        let path = self.root.join(name);
        let mut body = lines.join("\n");
        if !body.is_empty() {
            body.push('\n');
        }
        fs::write(&path, body).with_context(|| format!("writing {}", path.display()))
    }
}
