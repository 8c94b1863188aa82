//! # Certificate SAN Backends
//!
//! Ordered strategies for pulling a target's Subject Alternative Names:
//! a live TLS handshake through `openssl` first, the crt.sh transparency
//! log as a fallback. The phase tries them in order and stops at the
//! first strategy that yields a non-empty set.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

/// One way of obtaining SANs: the command to run and the parser for its
/// output.
pub struct SanStrategy {
    pub name: &'static str,
    pub argv: Vec<String>,
    pub parse: fn(&str) -> HashSet<String>,
}

/// Strategies in fallback order.
pub fn san_strategies(domain: &str) -> Vec<SanStrategy> {
    vec![
        SanStrategy {
            name: "openssl",
            // s_client needs its stdin closed to terminate; the runner
            // always wires /dev/null to stdin.
            argv: vec![
                "sh".to_string(),
                "-c".to_string(),
                format!(
                    "openssl s_client -connect {domain}:443 -servername {domain} 2>/dev/null \
                     | openssl x509 -noout -text"
                ),
            ],
            parse: parse_openssl_sans,
        },
        SanStrategy {
            name: "crt.sh",
            argv: vec![
                "curl".to_string(),
                "-s".to_string(),
                "-m".to_string(),
                "15".to_string(),
                format!("https://crt.sh/?q={domain}&output=json"),
            ],
            parse: parse_crtsh_sans,
        },
    ]
}

static DNS_SAN_RE: OnceLock<Regex> = OnceLock::new();
static CRTSH_RE: OnceLock<Regex> = OnceLock::new();

/// Reads `DNS:` entries from the subjectAltName extension in
/// `openssl x509 -text` output.
pub fn parse_openssl_sans(text: &str) -> HashSet<String> {
    let re = DNS_SAN_RE.get_or_init(|| Regex::new(r"DNS:([A-Za-z0-9*][A-Za-z0-9.*-]*)").unwrap());

    re.captures_iter(text)
        .filter_map(|cap| normalize_san(&cap[1]))
        .collect()
}

/// Reads `name_value` fields from crt.sh JSON output. Values may hold
/// several newline-escaped names per entry.
pub fn parse_crtsh_sans(text: &str) -> HashSet<String> {
    let re = CRTSH_RE.get_or_init(|| Regex::new(r#""name_value"\s*:\s*"([^"]+)""#).unwrap());

    re.captures_iter(text)
        .flat_map(|cap| {
            cap[1]
                .split("\\n")
                .filter_map(normalize_san)
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Lowercases and strips the wildcard label; `*.example.com` becomes
/// `example.com`. Names that are wildcard-only or empty are dropped.
fn normalize_san(raw: &str) -> Option<String> {
    let name = raw.trim().to_ascii_lowercase();
    let name = name.strip_prefix("*.").unwrap_or(&name).to_string();
    if name.is_empty() || name == "*" || !name.contains('.') {
        return None;
    }
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openssl_sans_wildcard_stripped() {
        let text = "\
            X509v3 Subject Alternative Name:\n\
                DNS:*.example.com, DNS:example.com, DNS:mail.example.net\n";
        let sans = parse_openssl_sans(text);
        assert!(sans.contains("example.com"));
        assert!(sans.contains("mail.example.net"));
        assert!(!sans.iter().any(|s| s.starts_with('*')));
        assert_eq!(sans.len(), 2);
    }

    #[test]
    fn test_crtsh_sans() {
        let json = r#"[{"name_value":"*.example.com\nexample.com"},{"name_value":"api.example.com"}]"#;
        let sans = parse_crtsh_sans(json);
        assert!(sans.contains("example.com"));
        assert!(sans.contains("api.example.com"));
        assert_eq!(sans.len(), 2);
    }

    #[test]
    fn test_garbage_yields_empty() {
        assert!(parse_openssl_sans("connect: Connection refused").is_empty());
        assert!(parse_crtsh_sans("<html>rate limited</html>").is_empty());
    }

    #[test]
    fn test_strategy_order() {
        let strategies = san_strategies("example.com");
        assert_eq!(strategies[0].name, "openssl");
        assert_eq!(strategies[1].name, "crt.sh");
    }
}
