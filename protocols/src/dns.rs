//! # DNS Query Backends
//!
//! Builds the argv batteries for the DNS recon phase: a fixed set of
//! record-type queries through two resolver tools (`dig` and `host`),
//! plus brute-force queries for a built-in subdomain wordlist. Also owns
//! the reverse-lookup query and its answer parser.

use std::net::IpAddr;

const RECORD_TYPES: &[&str] = &["A", "AAAA", "MX", "NS", "TXT", "SOA", "CNAME"];

/// Common subdomain labels probed during brute-force enumeration.
const SUBDOMAIN_WORDLIST: &[&str] = &[
    "www", "mail", "smtp", "pop", "imap", "webmail", "mx", "mx1", "mx2", "ns1", "ns2", "ns3",
    "dns", "vpn", "remote", "gateway", "api", "dev", "staging", "test", "beta", "demo", "admin",
    "portal", "intranet", "internal", "cdn", "static", "assets", "img", "media", "blog", "shop",
    "store", "app", "mobile", "m", "git", "gitlab", "jenkins", "ci", "db", "mysql", "sql", "ftp",
    "sftp", "owa", "autodiscover", "cpanel", "whm", "monitor", "status", "docs", "help", "support",
];

/// The full query battery for one domain: every record type through both
/// resolver tools, plus A/AAAA brute-force queries over the wordlist.
pub fn query_battery(domain: &str) -> Vec<Vec<String>> {
    let mut battery: Vec<Vec<String>> = Vec::new();

    for rtype in RECORD_TYPES {
        battery.push(dig_query(domain, rtype));
        battery.push(host_query(domain, rtype));
    }

    for label in SUBDOMAIN_WORDLIST {
        let name = format!("{label}.{domain}");
        battery.push(dig_query(&name, "A"));
        battery.push(dig_query(&name, "AAAA"));
    }

    battery
}

fn dig_query(name: &str, rtype: &str) -> Vec<String> {
    vec![
        "dig".to_string(),
        "+short".to_string(),
        "+time=5".to_string(),
        "+tries=1".to_string(),
        name.to_string(),
        rtype.to_string(),
    ]
}

fn host_query(name: &str, rtype: &str) -> Vec<String> {
    vec![
        "host".to_string(),
        "-t".to_string(),
        rtype.to_string(),
        "-W".to_string(),
        "5".to_string(),
        name.to_string(),
    ]
}

/// Reverse (PTR) lookup for one address against an explicit resolver.
pub fn reverse_query(ip: &IpAddr, resolver: &IpAddr) -> Vec<String> {
    vec![
        "dig".to_string(),
        "+short".to_string(),
        "+time=5".to_string(),
        "+tries=1".to_string(),
        "-x".to_string(),
        ip.to_string(),
        format!("@{resolver}"),
    ]
}

/// Parses a `dig +short -x` answer into hostnames, preserving the
/// resolver's answer order. Comment lines and empty lines are noise.
pub fn parse_ptr_answer(text: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(';') {
            continue;
        }
        let name = line.trim_end_matches('.').to_ascii_lowercase();
        if !name.is_empty() && !names.contains(&name) {
            names.push(name);
        }
    }

    names
}
