#![cfg(test)]
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;

use sweepr_common::config::RunConfig;
use sweepr_common::error::ToolError;
use sweepr_common::network::cidr::CidrRange;
use sweepr_common::network::target::Domain;
use sweepr_core::invoke::ToolInvoker;
use sweepr_core::store::ReconStore;
use sweepr_core::{cidr_scan, phases, pipeline};
use tempfile::TempDir;

use crate::util::{FakeInvoker, is_reverse_query};

const TARGET_IP: &str = "93.184.216.34";

/// Backend behavior for a healthy run: DNS answers with one public and
/// one private address, openssl produces a wildcard SAN, Cymru and RADB
/// answer their whois queries.
fn happy_script(argv: &[String]) -> Result<String, ToolError> {
    let joined = argv.join(" ");

    if is_reverse_query(argv) {
        if joined.contains(TARGET_IP) {
            return Ok("edge.example.com.\n".to_string());
        }
        return Ok(String::new());
    }

    match argv[0].as_str() {
        "dig" | "host" => Ok(format!("{TARGET_IP}\n10.0.0.5\n")),
        "sh" => Ok("X509v3 Subject Alternative Name:\n    DNS:*.example.com, DNS:www.example.com\n"
            .to_string()),
        "whois" if joined.contains("whois.cymru.com") => Ok(format!(
            "AS | IP | BGP Prefix | CC | Registry | Allocated | AS Name\n\
             64500 | {TARGET_IP} | 93.184.216.0/24 | US | arin | 2010-01-01 | EXAMPLE-NET, US\n"
        )),
        "whois" if joined.contains("whois.radb.net") => {
            Ok("route:      203.0.113.0/24\norigin:     AS64500\n".to_string())
        }
        _ => Err(ToolError::Execution(format!("unscripted: {joined}"))),
    }
}

fn run_store() -> (TempDir, ReconStore) {
    let dir = TempDir::new().unwrap();
    let store = ReconStore::create(dir.path().join("run")).unwrap();
    (dir, store)
}

#[tokio::test]
async fn full_pipeline_happy_path() {
    let (_dir, store) = run_store();
    let target: Domain = "example.com".parse().unwrap();
    let cfg = RunConfig {
        perform_reverse_dns: true,
        ..RunConfig::default()
    };

    let invoker: Arc<dyn ToolInvoker> = FakeInvoker::new(happy_script);
    let (result, summary) = pipeline::run(&target, &cfg, invoker, &store).await.unwrap();

    // The private address never entered the aggregate.
    let ip: IpAddr = TARGET_IP.parse().unwrap();
    assert_eq!(result.ips.len(), 1);
    assert!(result.ips.contains(&ip));

    // Wildcard stripped, target plus one extra SAN.
    assert!(result.ssl_domains.contains("example.com"));
    assert!(result.ssl_domains.contains("www.example.com"));
    assert!(!result.ssl_domains.iter().any(|d| d.contains('*')));

    let record = result.asn_info.get(&ip).unwrap();
    assert_eq!(record.asn, "AS64500");
    assert_eq!(record.description, "EXAMPLE-NET, US");

    assert_eq!(
        result.reverse_dns.get(&ip).unwrap(),
        &vec!["edge.example.com".to_string()]
    );

    assert_eq!(summary.addresses, 1);
    assert_eq!(summary.asn_covered, 1);
    assert_eq!(summary.cidrs_collected, 1);
    assert_eq!(summary.cidrs_scanned, 0);

    // Every phase persisted its slice.
    let root = store.root();
    assert_eq!(
        std::fs::read_to_string(root.join("hosts.txt")).unwrap(),
        format!("{TARGET_IP}\n")
    );
    assert!(root.join("ssl_domains.txt").exists());
    assert!(root.join("asn.txt").exists());
    assert_eq!(
        std::fs::read_to_string(root.join("cidrs.txt")).unwrap(),
        "203.0.113.0/24\n"
    );
    assert!(root.join("reverse_dns.txt").exists());
}

#[tokio::test]
async fn pipeline_survives_total_backend_failure() {
    let (_dir, store) = run_store();
    let target: Domain = "example.com".parse().unwrap();
    let cfg = RunConfig::default();

    let invoker: Arc<dyn ToolInvoker> =
        FakeInvoker::new(|argv| Err(ToolError::NotFound(argv[0].clone())));
    let (result, summary) = pipeline::run(&target, &cfg, invoker, &store).await.unwrap();

    assert!(result.ips.is_empty());
    assert!(result.ssl_domains.is_empty());
    assert_eq!(summary.addresses, 0);
    // Empty files still land on disk.
    assert!(store.root().join("hosts.txt").exists());
}

#[tokio::test]
async fn san_discovery_falls_back_to_crtsh() {
    let (_dir, store) = run_store();
    let target: Domain = "example.com".parse().unwrap();
    let cfg = RunConfig::default();

    let invoker: Arc<dyn ToolInvoker> = FakeInvoker::new(|argv| match argv[0].as_str() {
        "sh" => Err(ToolError::NotFound("openssl".to_string())),
        "curl" => Ok(r#"[{"name_value":"*.example.com\napi.example.com"}]"#.to_string()),
        _ => Ok(String::new()),
    });

    let (result, _summary) = pipeline::run(&target, &cfg, invoker, &store).await.unwrap();
    assert!(result.ssl_domains.contains("example.com"));
    assert!(result.ssl_domains.contains("api.example.com"));
}

#[tokio::test]
async fn cidr_sweep_small_range_single_batch() {
    let (_dir, store) = run_store();
    let cfg = RunConfig::default();

    // Resolver that always answers.
    let invoker = FakeInvoker::new(|_argv| Ok("host.example.net.\n".to_string()));
    let dyn_invoker: Arc<dyn ToolInvoker> = invoker.clone();

    let cidr: CidrRange = "203.0.113.0/30".parse().unwrap();
    let results = cidr_scan::scan(&[cidr], &cfg, &dyn_invoker, &store)
        .await
        .unwrap();

    let map = results.get(&cidr).unwrap();
    assert_eq!(map.len(), 2);
    // Two usable hosts, batch size 500: exactly one invocation per host.
    assert_eq!(invoker.call_count(), 2);
    assert!(store.root().join("cidr_203.0.113.0_30.txt").exists());
}

#[tokio::test]
async fn oversized_cidr_skipped_without_blocking_others() {
    let (_dir, store) = run_store();
    let cfg = RunConfig {
        max_addresses_per_cidr: 100,
        ..RunConfig::default()
    };

    let invoker: Arc<dyn ToolInvoker> =
        FakeInvoker::new(|_argv| Ok("host.example.net.\n".to_string()));

    let big: CidrRange = "198.51.100.0/24".parse().unwrap();
    let small: CidrRange = "203.0.113.0/30".parse().unwrap();
    let results = cidr_scan::scan(&[big, small], &cfg, &invoker, &store)
        .await
        .unwrap();

    assert!(!results.contains_key(&big));
    assert!(results.contains_key(&small));
    assert!(!store.root().join("cidr_198.51.100.0_24.txt").exists());
    assert!(store.root().join("cidr_203.0.113.0_30.txt").exists());
}

#[tokio::test]
async fn reverse_sweep_is_idempotent() {
    let cfg = RunConfig::default();
    let invoker: Arc<dyn ToolInvoker> = FakeInvoker::new(|argv| {
        // Deterministic per address: answer only for .1.
        if argv.iter().any(|a| a == "203.0.113.1") {
            Ok("one.example.net.\n".to_string())
        } else {
            Ok(String::new())
        }
    });

    let ips: Vec<IpAddr> = vec![
        "203.0.113.1".parse().unwrap(),
        "203.0.113.2".parse().unwrap(),
    ];

    let first = phases::rdns::sweep(ips.clone(), 8, &cfg, &invoker).await;
    let second = phases::rdns::sweep(ips, 8, &cfg, &invoker).await;

    let expected: HashMap<IpAddr, Vec<String>> = HashMap::from([(
        "203.0.113.1".parse().unwrap(),
        vec!["one.example.net".to_string()],
    )]);
    assert_eq!(first, expected);
    assert_eq!(first, second);
}
