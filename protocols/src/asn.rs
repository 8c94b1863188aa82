//! # ASN Lookup Backends
//!
//! Two ordered strategies per address: the Team Cymru IP-to-ASN whois
//! service first, a plain registry whois as fallback. A third builder
//! queries RADB for the prefixes an ASN announces.
//!
//! Parse contract (strict, no guessing at upstream formats):
//! * Cymru rows are pipe-separated; a data row needs at least three
//!   fields. The ASN is field zero ("AS" prefixed if bare digits) and the
//!   description is the entire final field, trimmed — never split on
//!   whitespace.
//! * Plain whois: the ASN comes from an `origin:`/`OriginAS:` value; the
//!   description is the full value of the first `OrgName:`/`org-name:`/
//!   `descr:` line.

use std::collections::HashSet;
use std::net::IpAddr;

use sweepr_common::network::cidr::CidrRange;

/// Structured answer from one ASN lookup. The owning IP is attached by
/// the phase that ran the lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsnAnswer {
    pub asn: String,
    pub description: String,
}

/// One way of resolving an address to its ASN.
pub struct AsnStrategy {
    pub name: &'static str,
    pub argv: Vec<String>,
    pub parse: fn(&str) -> Option<AsnAnswer>,
}

/// Strategies in fallback order.
pub fn asn_strategies(ip: &IpAddr) -> Vec<AsnStrategy> {
    vec![
        AsnStrategy {
            name: "cymru",
            argv: vec![
                "whois".to_string(),
                "-h".to_string(),
                "whois.cymru.com".to_string(),
                format!(" -v {ip}"),
            ],
            parse: parse_cymru,
        },
        AsnStrategy {
            name: "whois",
            argv: vec!["whois".to_string(), ip.to_string()],
            parse: parse_plain_whois,
        },
    ]
}

/// RADB query for the prefixes announced by one ASN.
pub fn cidr_query(asn: &str) -> Vec<String> {
    vec![
        "whois".to_string(),
        "-h".to_string(),
        "whois.radb.net".to_string(),
        "--".to_string(),
        "-i".to_string(),
        "origin".to_string(),
        asn.to_string(),
    ]
}

/// Parses a Team Cymru verbose answer.
pub fn parse_cymru(text: &str) -> Option<AsnAnswer> {
    for line in text.lines() {
        let fields: Vec<&str> = line.split('|').map(str::trim).collect();
        if fields.len() < 3 {
            continue;
        }
        // The header row carries "AS" in field zero; data rows are digits.
        if fields[0].is_empty() || !fields[0].chars().all(|c| c.is_ascii_digit()) {
            continue;
        }

        let description = fields[fields.len() - 1].to_string();
        if description.is_empty() || description == "NA" {
            continue;
        }

        return Some(AsnAnswer {
            asn: format!("AS{}", fields[0]),
            description,
        });
    }
    None
}

/// Parses a plain registry whois answer.
pub fn parse_plain_whois(text: &str) -> Option<AsnAnswer> {
    let mut asn: Option<String> = None;
    let mut description: Option<String> = None;

    for line in text.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim().to_ascii_lowercase();
        let value = value.trim();
        if value.is_empty() {
            continue;
        }

        match key.as_str() {
            "origin" | "originas" => {
                if asn.is_none() {
                    let v = value.to_ascii_uppercase();
                    let v = if v.starts_with("AS") { v } else { format!("AS{v}") };
                    asn = Some(v);
                }
            }
            "orgname" | "org-name" | "descr" => {
                if description.is_none() {
                    description = Some(value.to_string());
                }
            }
            _ => {}
        }
    }

    Some(AsnAnswer {
        asn: asn?,
        description: description.unwrap_or_default(),
    })
}

/// Pulls `route:`/`route6:` values out of a RADB answer. Malformed
/// prefixes are registry noise, not errors.
pub fn parse_routes(text: &str) -> HashSet<CidrRange> {
    let mut routes: HashSet<CidrRange> = HashSet::new();

    for line in text.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim().to_ascii_lowercase();
        if key != "route" && key != "route6" {
            continue;
        }
        if let Ok(range) = value.trim().parse::<CidrRange>() {
            routes.insert(range);
        }
    }

    routes
}
