// src/main.rs
// =============================================================================
// Entry point of the documentation link checker.
//
// What happens here:
// 1. Parse command-line arguments and load the configuration
// 2. Endpoint pass: health-check every RPC root in the endpoint registry
// 3. Link pass: scan the docs tree, de-duplicate URLs, probe each one
// 4. Print the summary and exit (0 = nothing failed, 1 = failures, a fatal
//    error or a bad command line)
//
// Probes run one at a time by default. With --concurrency N up to N are in
// flight, but results are still printed and recorded in discovery order.
// =============================================================================

mod checker;
mod cli;
mod config;
mod report;
mod scan;

use anyhow::Result;
use clap::Parser;
use futures::stream::{self, StreamExt};
use std::io;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use checker::{dedup_by_url, CheckTarget, Prober, SkipRules};
use cli::Cli;
use config::CheckerConfig;
use report::{CheckResult, Outcomes, ResultSet};

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version text go to stdout, usage errors to stderr
            e.print().ok();
            std::process::exit(cli::usage_exit_code(&e));
        }
    };
    init_tracing(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Fatal error: {e:#}");
            1
        }
    };

    std::process::exit(exit_code);
}

// Diagnostics go to stderr so they never interleave with the report.
// RUST_LOG wins when set; otherwise this crate logs at WARN (DEBUG with
// --verbose).
fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={level}", env!("CARGO_CRATE_NAME"))));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

// Runs the selected passes and returns the process exit code
async fn run(cli: Cli) -> Result<i32> {
    let mut config = CheckerConfig::load(cli.config.as_deref())?;
    config.apply_cli(&cli);

    let skip_rules = SkipRules::compile(&config.skip_rules)?;
    debug!(rules = skip_rules.len(), timeout_ms = config.timeout_ms, "configuration loaded");
    let prober = Prober::new(&config, skip_rules)?;

    println!("XPR Network Documentation Link Checker\n");
    println!("{}", "=".repeat(50));

    let mut results = ResultSet::default();

    if cli.run_endpoints() {
        check_endpoints(&config, &prober, results.endpoints_mut()).await?;
    }

    if cli.run_links() {
        check_links(&config, &prober, results.links_mut()).await?;
    }

    results.write_summary(&mut io::stdout().lock(), cli.verbose)?;
    Ok(results.exit_code())
}

// Endpoint pass. A missing registry is only a notice; the run continues.
async fn check_endpoints(
    config: &CheckerConfig,
    prober: &Prober,
    outcomes: &mut Outcomes,
) -> Result<()> {
    println!("\n## Checking API Endpoints\n");

    let path = config.endpoints_path();
    let Some(endpoints) = scan::load_endpoints(&path)? else {
        println!("  {} not found!", path.display());
        return Ok(());
    };

    println!("Found {} API endpoints to check...\n", endpoints.len());

    let targets = endpoints.into_iter().map(CheckTarget::endpoint).collect();
    probe_all(prober, targets, config.concurrency, outcomes).await;
    Ok(())
}

// Link pass. Scan errors are fatal and propagate out of the run.
async fn check_links(
    config: &CheckerConfig,
    prober: &Prober,
    outcomes: &mut Outcomes,
) -> Result<()> {
    println!("\n## Checking Documentation Links\n");

    let files = scan::find_markdown_files(&config.root, &config.extensions)?;
    println!("Found {} markdown files to scan...\n", files.len());

    let all_links = scan::collect_links(&config.root, &files)?;
    let unique_links = dedup_by_url(all_links);
    println!("Found {} unique URLs to check...\n", unique_links.len());

    probe_all(prober, unique_links, config.concurrency, outcomes).await;
    Ok(())
}

// Probes every target and records one outcome per target
//
// `buffered` keeps up to `concurrency` probes in flight but yields results
// in input order, so the progress stream and the report stay deterministic.
async fn probe_all(
    prober: &Prober,
    targets: Vec<CheckTarget>,
    concurrency: usize,
    outcomes: &mut Outcomes,
) {
    let mut probes = stream::iter(targets)
        .map(|target| async move {
            let outcome = prober.probe(&target).await;
            CheckResult { target, outcome }
        })
        .buffered(concurrency.max(1));

    while let Some(result) = probes.next().await {
        println!("{}", report::progress_line(&result));
        outcomes.record(result);
    }
}
