//! Path normalization.
//!
//! # Responsibilities
//! - Strip the gateway's own mount point and the legacy prefix
//! - Produce the clean path (route key) and the forward path (upstream URL)
//!
//! # Design Decisions
//! - Rules are ordered and anchored: a rule only fires when the path starts
//!   with its prefix at a segment boundary, so repeated prefix text deeper in
//!   the path is never touched
//! - No case folding, percent-decoding or dot-segment collapsing

use crate::config::PrefixRule;

/// Result of normalizing one request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedPath {
    /// Route-matching key; trailing slashes removed. May be empty.
    pub clean: String,
    /// Path sent upstream; trailing slash shape preserved.
    pub forward: String,
}

/// Applies an ordered list of prefix rewrite rules.
#[derive(Debug, Clone)]
pub struct PathNormalizer {
    rules: Vec<PrefixRule>,
}

impl PathNormalizer {
    pub fn new(rules: Vec<PrefixRule>) -> Self {
        Self { rules }
    }

    /// Apply every rule in order, returning the forward path.
    pub fn forward_path(&self, path: &str) -> String {
        let mut current = path.to_string();
        for rule in &self.rules {
            if let Some(rest) = strip_segment_prefix(&current, &rule.prefix) {
                current = format!("{}{}", rule.replacement, rest);
            }
        }
        current
    }

    /// Rules applied, then trailing slashes stripped.
    pub fn clean_path(&self, path: &str) -> String {
        self.forward_path(path).trim_end_matches('/').to_string()
    }

    pub fn normalize(&self, path: &str) -> NormalizedPath {
        let forward = self.forward_path(path);
        let clean = forward.trim_end_matches('/').to_string();
        NormalizedPath { clean, forward }
    }
}

/// `Some(rest)` when `path` is `prefix` or `prefix/...`.
fn strip_segment_prefix<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = path.strip_prefix(prefix)?;
    if rest.is_empty() || rest.starts_with('/') || prefix.ends_with('/') {
        Some(rest)
    } else {
        None
    }
}
