// src/config.rs
// =============================================================================
// Run configuration.
//
// Sources, lowest to highest precedence:
// 1. Built-in defaults (the values below)
// 2. An optional JSON file passed with --config
// 3. Command-line flags
//
// Every field has a serde default, so a config file only needs to list what
// it changes, e.g.:
//
//   { "timeout_ms": 5000, "skip_rules": [{ "pattern": "internal\\.test", "reason": "private" }] }
//
// Note that a `skip_rules` entry in the file replaces the built-in list.
// =============================================================================

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::cli::Cli;

#[derive(Debug, Clone, Deserialize)]
pub struct CheckerConfig {
    /// Root of the documentation tree
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Endpoint registry, relative to `root` unless absolute
    #[serde(default = "default_endpoints_file")]
    pub endpoints_file: PathBuf,

    /// Per-request timeout; every redirect hop and retry gets a fresh budget
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    /// Probes in flight at once. 1 keeps the run strictly sequential.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// File extensions (without the dot) scanned for links
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    #[serde(default = "default_skip_rules")]
    pub skip_rules: Vec<SkipRuleConfig>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SkipRuleConfig {
    pub pattern: String,
    pub reason: String,
}

fn default_root() -> PathBuf {
    PathBuf::from("src")
}

fn default_endpoints_file() -> PathBuf {
    PathBuf::from("client-sdks/endpoints.md")
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_max_redirects() -> usize {
    10
}

fn default_concurrency() -> usize {
    1
}

fn default_user_agent() -> String {
    "XPR-Docs-Link-Checker/1.0".to_string()
}

fn default_extensions() -> Vec<String> {
    vec!["md".to_string()]
}

const LOCAL_OR_EXAMPLE: &str = "Local or example address";
const PLACEHOLDER: &str = "Template placeholder";
const BLOCKS_BOTS: &str = "Host blocks automated requests";
const ENDPOINT_ROOT: &str = "API endpoint root (checked by the endpoint pass)";

// RPC roots listed in the endpoint registry. Their bare root usually answers
// 404, so the link pass leaves them to the health check.
const ENDPOINT_ROOTS: &[&str] = &[
    r"proton\.eosusa\.io$",
    r"proton\.cryptolions\.io$",
    r"api\.protonnz\.com$",
    r"proton\.protonuk\.io$",
    r"proton\.eoscafeblock\.com$",
    r"api\.totalproton\.tech$",
    r"mainnet\.brotonbp\.com$",
    r"proton\.eu\.eosamsterdam\.net$",
    r"protonapi\.blocksindia\.com$",
    r"api-xprnetwork-main\.saltant\.io$",
    r"protonapi\.ledgerwise\.io$",
    r"proton-api\.eosiomadrid\.io$",
    r"proton\.genereos\.io$",
    r"api-proton\.nodeone\.network",
    r"proton-public\.neftyblocks\.com$",
    r"api-proton\.eosarabia\.net$",
    r"api\.luminaryvisn\.com$",
    r"testnet-api\.alvosec\.com$",
    r"proton-testnet\.cryptolions\.io$",
    r"testnet\.brotonbp\.com$",
    r"testnet-api\.xprcore\.com$",
    r"protontest\.eu\.eosamsterdam\.net$",
    r"api-xprnetwork-test\.saltant\.io$",
    r"testnet-api\.xprdata\.org$",
    r"testnet\.rockerone\.io$",
    r"test\.proton\.eosusa\.io$",
];

fn default_skip_rules() -> Vec<SkipRuleConfig> {
    let fixed = [
        (r"localhost", LOCAL_OR_EXAMPLE),
        (r"127\.0\.0\.1", LOCAL_OR_EXAMPLE),
        (r"example\.com", LOCAL_OR_EXAMPLE),
        (r"(?i)your[_-]?server", PLACEHOLDER),
        (r"YOU_ACCOUNT", PLACEHOLDER),
        (r"ACCOUNT_NAME", PLACEHOLDER),
        (r"youracc", PLACEHOLDER),
        (r"<.*>", PLACEHOLDER),
        (r"github\.com/user/repo", PLACEHOLDER),
        (r"twitter\.com", BLOCKS_BOTS),
        (r"x\.com", BLOCKS_BOTS),
        (r"npmjs\.com", BLOCKS_BOTS),
    ];

    fixed
        .into_iter()
        .chain(ENDPOINT_ROOTS.iter().map(|pattern| (*pattern, ENDPOINT_ROOT)))
        .map(|(pattern, reason)| SkipRuleConfig {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        })
        .collect()
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            endpoints_file: default_endpoints_file(),
            timeout_ms: default_timeout_ms(),
            max_redirects: default_max_redirects(),
            concurrency: default_concurrency(),
            user_agent: default_user_agent(),
            extensions: default_extensions(),
            skip_rules: default_skip_rules(),
        }
    }
}

impl CheckerConfig {
    /// Reads a JSON config file, or returns the defaults when no path is given.
    ///
    /// # Errors
    /// Fails if the file cannot be read or is not valid JSON for this struct.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: CheckerConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Layers command-line overrides on top of the loaded values
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(root) = &cli.root {
            self.root = root.clone();
        }
        if let Some(endpoints_file) = &cli.endpoints_file {
            self.endpoints_file = endpoints_file.clone();
        }
        if let Some(timeout) = cli.timeout {
            self.timeout_ms = timeout;
        }
        if let Some(concurrency) = cli.concurrency {
            self.concurrency = concurrency;
        }
        self.concurrency = self.concurrency.max(1);
    }

    /// Location of the endpoint registry on disk
    pub fn endpoints_path(&self) -> PathBuf {
        if self.endpoints_file.is_absolute() {
            self.endpoints_file.clone()
        } else {
            self.root.join(&self.endpoints_file)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = CheckerConfig::default();
        assert_eq!(config.timeout_ms, 10_000);
        assert_eq!(config.max_redirects, 10);
        assert_eq!(config.concurrency, 1);
        assert_eq!(config.extensions, vec!["md"]);
        assert_eq!(
            config.endpoints_path(),
            PathBuf::from("src/client-sdks/endpoints.md")
        );
        assert!(config
            .skip_rules
            .iter()
            .any(|r| r.pattern == r"npmjs\.com" && r.reason == BLOCKS_BOTS));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "timeout_ms": 2500, "skip_rules": [{{ "pattern": "internal\\.test", "reason": "private" }}] }}"#
        )
        .unwrap();

        let config = CheckerConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.timeout_ms, 2500);
        assert_eq!(config.max_redirects, 10);
        assert_eq!(config.root, PathBuf::from("src"));
        assert_eq!(
            config.skip_rules,
            vec![SkipRuleConfig {
                pattern: r"internal\.test".to_string(),
                reason: "private".to_string(),
            }]
        );
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(CheckerConfig::load(Some(file.path())).is_err());
    }

    #[test]
    fn test_cli_overrides_file_values() {
        let cli = Cli::parse_from([
            "docs-linkcheck",
            "--timeout=3000",
            "--root",
            "docs",
            "--concurrency",
            "0",
        ]);
        let mut config = CheckerConfig::default();
        config.apply_cli(&cli);

        assert_eq!(config.timeout_ms, 3000);
        assert_eq!(config.root, PathBuf::from("docs"));
        assert_eq!(config.concurrency, 1);
        assert_eq!(config.endpoints_path(), PathBuf::from("docs/client-sdks/endpoints.md"));
    }
}
