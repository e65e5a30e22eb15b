// src/scan/endpoints.rs
// =============================================================================
// Reads API endpoint candidates out of the endpoint registry page.
//
// The registry lists RPC roots inside fenced code blocks:
//
//   ```
//   https://proton.eosusa.io
//   https://proton.cryptolions.io
//   ```
//
// A line inside a fence is a candidate when, trimmed, it starts with
// https://, has no inner whitespace, and is not a docs or API path
// (/v2/docs, /v1/). Lines outside fences are ignored.
// =============================================================================

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;
use tracing::warn;

const FENCE: &str = "```";

/// Substrings marking a URL as a documentation or API path rather than a root
const NON_ROOT_MARKERS: &[&str] = &["/v2/docs", "/v1/"];

// Extracts endpoint candidates, de-duplicated, in order of first appearance
pub fn extract_api_endpoints(content: &str) -> Vec<String> {
    let mut endpoints = Vec::new();
    let mut seen = HashSet::new();
    let mut in_code_block = false;

    for line in content.lines() {
        // A fence line only toggles state; its info string is never a candidate
        if line.starts_with(FENCE) {
            in_code_block = !in_code_block;
            continue;
        }
        if !in_code_block {
            continue;
        }

        let trimmed = line.trim();
        if is_endpoint_candidate(trimmed) && seen.insert(trimmed) {
            endpoints.push(trimmed.to_string());
        }
    }

    endpoints
}

fn is_endpoint_candidate(line: &str) -> bool {
    line.starts_with("https://")
        && !line.contains(char::is_whitespace)
        && !NON_ROOT_MARKERS.iter().any(|marker| line.contains(marker))
}

// Loads the registry file if it exists
//
// Returns: Ok(None) when the file is missing (the endpoint pass is skipped
// with a notice), Err when it exists but cannot be read
pub fn load_endpoints(path: &Path) -> Result<Option<Vec<String>>> {
    if !path.exists() {
        warn!(path = %path.display(), "endpoint registry not found, skipping endpoint checks");
        return Ok(None);
    }

    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read endpoint registry {}", path.display()))?;
    Ok(Some(extract_api_endpoints(&String::from_utf8_lossy(&bytes))))
}
