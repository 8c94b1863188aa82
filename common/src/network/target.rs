//! # Recon Target Model
//!
//! A target is a bare domain name (`example.com`). Everything else the
//! pipeline touches is derived from it. Validation happens once, at parse
//! time; an invalid domain is a fatal input error and the pipeline never
//! starts.

use std::fmt;
use std::str::FromStr;

use crate::error::SetupError;

/// A validated target domain.
///
/// Immutable once parsed. Guarantees DNS label syntax: alphanumeric and
/// hyphen labels (no leading/trailing hyphen), at most 63 bytes per label
/// and 253 total, and an alphabetic TLD of at least two characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Domain(String);

impl Domain {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Builds `label.domain` for brute-force queries.
    pub fn subdomain(&self, label: &str) -> String {
        format!("{label}.{}", self.0)
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for Domain {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().trim_end_matches('.').to_ascii_lowercase();

        if name.len() > 253 || name.is_empty() {
            return Err(SetupError::InvalidTarget(s.to_string()));
        }

        let labels: Vec<&str> = name.split('.').collect();
        if labels.len() < 2 {
            return Err(SetupError::InvalidTarget(s.to_string()));
        }

        for label in &labels {
            if !is_valid_label(label) {
                return Err(SetupError::InvalidTarget(s.to_string()));
            }
        }

        let tld = labels[labels.len() - 1];
        if tld.len() < 2 || !tld.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(SetupError::InvalidTarget(s.to_string()));
        }

        Ok(Domain(name))
    }
}

fn is_valid_label(label: &str) -> bool {
    if label.is_empty() || label.len() > 63 {
        return false;
    }
    if label.starts_with('-') || label.ends_with('-') {
        return false;
    }
    label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
