use std::path::Path;

use colored::*;
use sweepr_common::network::target::Domain;
use sweepr_core::result::RunSummary;

/// Final aggregate report. Per-task failures are silent during the run,
/// so these counts are how a degraded run becomes visible.
pub fn summary(domain: &Domain, summary: &RunSummary, out_dir: &Path) {
    let elapsed = format!("{:.2}s", summary.elapsed.as_secs_f64())
        .bold()
        .yellow();

    println!();
    println!(
        "{} {} {} {}",
        "Reconnaissance of".bold(),
        domain.to_string().bold().cyan(),
        "complete in".bold(),
        elapsed
    );
    println!("  {:>5} addresses", count(summary.addresses));
    println!("  {:>5} certificate SAN domains", count(summary.ssl_domains));
    println!("  {:>5} addresses with ASN coverage", count(summary.asn_covered));
    println!(
        "  {:>5} addresses with reverse DNS",
        count(summary.reverse_dns_covered)
    );
    println!("  {:>5} CIDRs collected", count(summary.cidrs_collected));
    println!("  {:>5} CIDRs swept", count(summary.cidrs_scanned));
    if summary.scan_discovered > 0 {
        println!(
            "  {:>5} extra live hosts from scan output",
            count(summary.scan_discovered)
        );
    }
    println!("  results in {}", out_dir.display().to_string().underline());
}

fn count(n: usize) -> ColoredString {
    if n > 0 {
        n.to_string().green().bold()
    } else {
        n.to_string().dimmed()
    }
}
