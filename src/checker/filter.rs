// src/checker/filter.rs
// =============================================================================
// Skip rules and URL de-duplication.
//
// - SkipRules: regex patterns loaded once from configuration. A URL matching
//   any rule is never requested; the prober reports it as Skipped with the
//   rule's reason so it shows up in the summary instead of vanishing.
// - dedup_by_url: keeps the first occurrence of every distinct URL string
//   across all files, preserving discovery order.
// =============================================================================

use anyhow::{Context, Result};
use regex::Regex;
use std::collections::HashSet;

use super::outcome::CheckTarget;
use crate::config::SkipRuleConfig;

#[derive(Debug, Clone)]
struct SkipRule {
    pattern: Regex,
    reason: String,
}

/// Compiled skip-rule list, shared read-only by every probe of a run
#[derive(Debug, Clone, Default)]
pub struct SkipRules {
    rules: Vec<SkipRule>,
}

impl SkipRules {
    /// Compiles the configured patterns.
    ///
    /// An invalid pattern is a configuration error and aborts the run.
    pub fn compile(configs: &[SkipRuleConfig]) -> Result<Self> {
        let rules = configs
            .iter()
            .map(|config| {
                let pattern = Regex::new(&config.pattern)
                    .with_context(|| format!("Invalid skip pattern '{}'", config.pattern))?;
                Ok(SkipRule {
                    pattern,
                    reason: config.reason.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rules })
    }

    /// Returns the reason of the first rule matching `url`, if any
    pub fn matching_reason(&self, url: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.pattern.is_match(url))
            .map(|rule| rule.reason.as_str())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }
}

// Keeps the first occurrence of each URL, in discovery order
//
// The surviving target keeps the source file and context of that first
// occurrence.
pub fn dedup_by_url(targets: Vec<CheckTarget>) -> Vec<CheckTarget> {
    let mut seen = HashSet::new();
    targets
        .into_iter()
        .filter(|target| seen.insert(target.value.clone()))
        .collect()
}
