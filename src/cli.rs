// src/cli.rs
// =============================================================================
// Command-line interface, declared with clap's derive API.
//
// No subcommands: a run is one pass over the endpoint registry followed by
// one pass over the documentation links, either of which can be switched off.
//
//   docs-linkcheck                      # both passes
//   docs-linkcheck --links-only --timeout=5000
//   docs-linkcheck --endpoints-only --verbose
// =============================================================================

use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "docs-linkcheck",
    version,
    about = "Checks RPC endpoints and outbound links referenced in the documentation",
    long_about = "docs-linkcheck health-checks every API endpoint listed in the endpoint registry \
                  and verifies that every http(s) link in the Markdown documentation is reachable. \
                  It exits with status 1 if anything failed, which makes it suitable for CI."
)]
pub struct Cli {
    /// Only check API endpoints from the endpoint registry
    #[arg(long, conflicts_with = "links_only")]
    pub endpoints_only: bool,

    /// Only check links found in Markdown files
    #[arg(long)]
    pub links_only: bool,

    /// Also list passed and skipped items, and log redirects and retries
    #[arg(long)]
    pub verbose: bool,

    /// Per-request timeout in milliseconds (default: 10000)
    ///
    /// Accepts both `--timeout 5000` and `--timeout=5000`
    #[arg(long, value_name = "MS")]
    pub timeout: Option<u64>,

    /// Root directory of the documentation tree (default: src)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Endpoint registry file, relative to the root unless absolute
    /// (default: client-sdks/endpoints.md)
    #[arg(long, value_name = "FILE")]
    pub endpoints_file: Option<PathBuf>,

    /// JSON configuration file (timeouts, skip rules, extensions, ...)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of probes in flight at once (default: 1, sequential)
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,
}

impl Cli {
    pub fn run_endpoints(&self) -> bool {
        !self.links_only
    }

    pub fn run_links(&self) -> bool {
        !self.endpoints_only
    }
}

/// Exit code for a command line clap could not turn into a run.
///
/// --help and --version exit 0; every usage error exits 1, the same code as
/// any other failed run.
pub fn usage_exit_code(error: &clap::Error) -> i32 {
    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}
