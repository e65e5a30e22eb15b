// src/report.rs
// =============================================================================
// Collects probe outcomes and renders the human-readable report.
//
// Output shape:
// - one progress line per target while the passes run
// - a summary block with pass/fail(/skip) counts per category
// - a detailed listing of every failure (and, with --verbose, of every pass
//   and skip)
//
// The run fails if and only if endpoints + links produced at least one
// failure. Skips never count as failures.
// =============================================================================

use colored::Colorize;
use std::io::{self, Write};

use crate::checker::{CheckTarget, ProbeOutcome, SuccessDetail, TargetKind};

/// Longest URL shown verbatim in a progress line
const PROGRESS_URL_WIDTH: usize = 60;

/// One target together with its outcome
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub target: CheckTarget,
    pub outcome: ProbeOutcome,
}

/// Outcomes of one category, partitioned as they are recorded
#[derive(Debug, Default)]
pub struct Outcomes {
    pub passed: Vec<CheckResult>,
    pub failed: Vec<CheckResult>,
    pub skipped: Vec<CheckResult>,
}

impl Outcomes {
    pub fn record(&mut self, result: CheckResult) {
        match result.outcome {
            ProbeOutcome::Success(_) => self.passed.push(result),
            ProbeOutcome::Failure(_) => self.failed.push(result),
            ProbeOutcome::Skipped(_) => self.skipped.push(result),
        }
    }
}

/// Results of one run. A category is `None` when its pass did not run.
#[derive(Debug, Default)]
pub struct ResultSet {
    pub endpoints: Option<Outcomes>,
    pub links: Option<Outcomes>,
}

impl ResultSet {
    pub fn endpoints_mut(&mut self) -> &mut Outcomes {
        self.endpoints.get_or_insert_with(Outcomes::default)
    }

    pub fn links_mut(&mut self) -> &mut Outcomes {
        self.links.get_or_insert_with(Outcomes::default)
    }

    pub fn total_failed(&self) -> usize {
        [&self.endpoints, &self.links]
            .into_iter()
            .flatten()
            .map(|outcomes| outcomes.failed.len())
            .sum()
    }

    /// 0 when nothing failed, 1 otherwise
    pub fn exit_code(&self) -> i32 {
        if self.total_failed() > 0 {
            1
        } else {
            0
        }
    }

    // Renders the summary block and the detailed listings
    pub fn write_summary<W: Write>(&self, out: &mut W, verbose: bool) -> io::Result<()> {
        writeln!(out, "\n{}", "=".repeat(50))?;
        writeln!(out, "\n## Summary\n")?;

        if let Some(endpoints) = &self.endpoints {
            writeln!(out, "API Endpoints:")?;
            writeln!(out, "  {}", format!("Passed: {}", endpoints.passed.len()).green())?;
            writeln!(out, "  {}", format!("Failed: {}", endpoints.failed.len()).red())?;
        }

        if let Some(links) = &self.links {
            writeln!(out, "Documentation Links:")?;
            writeln!(out, "  {}", format!("Passed: {}", links.passed.len()).green())?;
            writeln!(out, "  {}", format!("Failed: {}", links.failed.len()).red())?;
            writeln!(out, "  {}", format!("Skipped: {}", links.skipped.len()).yellow())?;
        }

        if self.total_failed() > 0 {
            writeln!(out, "\n## Failed Items\n")?;
            for result in self.all(|o| &o.failed) {
                write_item(out, result)?;
            }
        }

        if verbose {
            let passed: Vec<_> = self.all(|o| &o.passed).collect();
            if !passed.is_empty() {
                writeln!(out, "\n## Passed Items\n")?;
                for result in passed {
                    write_item(out, result)?;
                }
            }

            let skipped: Vec<_> = self.all(|o| &o.skipped).collect();
            if !skipped.is_empty() {
                writeln!(out, "\n## Skipped Items\n")?;
                for result in skipped {
                    write_item(out, result)?;
                }
            }
        }

        Ok(())
    }

    // Endpoints first, then links, each in recording order
    fn all(
        &self,
        pick: fn(&Outcomes) -> &Vec<CheckResult>,
    ) -> impl Iterator<Item = &CheckResult> + '_ {
        [&self.endpoints, &self.links]
            .into_iter()
            .flatten()
            .flat_map(move |outcomes| pick(outcomes).iter())
    }
}

// One entry of a detailed listing:
//
//   [LINK] https://docs.test/page
//          Source: guide/intro.md ("Changelog")
//          Error: Status: 404
fn write_item<W: Write>(out: &mut W, result: &CheckResult) -> io::Result<()> {
    let tag = match result.target.kind {
        TargetKind::Endpoint => "[ENDPOINT]",
        TargetKind::Link => "[LINK]",
    };
    let indent = " ".repeat(tag.len() + 3);

    let colored_tag = match result.outcome {
        ProbeOutcome::Success(_) => tag.green(),
        ProbeOutcome::Failure(_) => tag.red(),
        ProbeOutcome::Skipped(_) => tag.yellow(),
    };
    writeln!(out, "  {} {}", colored_tag, result.target.value)?;

    match (&result.target.source, &result.target.context) {
        (Some(source), Some(context)) => writeln!(out, "{indent}Source: {source} (\"{context}\")")?,
        (Some(source), None) => writeln!(out, "{indent}Source: {source}")?,
        _ => {}
    }

    match &result.outcome {
        ProbeOutcome::Failure(error) => writeln!(out, "{indent}Error: {error}")?,
        ProbeOutcome::Skipped(reason) => writeln!(out, "{indent}Reason: {reason}")?,
        ProbeOutcome::Success(detail) => writeln!(out, "{indent}{}", describe_success(detail))?,
    }

    Ok(())
}

fn describe_success(detail: &SuccessDetail) -> String {
    match detail {
        SuccessDetail::Link { status, final_url } => format!("Status: {status} ({final_url})"),
        SuccessDetail::Endpoint {
            head_block,
            chain_id: Some(chain_id),
        } => format!("Block: {head_block}, chain: {chain_id}"),
        SuccessDetail::Endpoint { head_block, .. } => format!("Block: {head_block}"),
    }
}

// The line printed as soon as a target has been probed
//
// Example:
//   "  Checking https://proton.eosusa.io... OK (block: 301234567)"
pub fn progress_line(result: &CheckResult) -> String {
    let shown = match result.target.kind {
        TargetKind::Endpoint => result.target.value.clone(),
        TargetKind::Link => truncate_url(&result.target.value),
    };

    let verdict = match &result.outcome {
        ProbeOutcome::Success(SuccessDetail::Endpoint { head_block, .. }) => {
            format!("{} (block: {head_block})", "OK".green())
        }
        ProbeOutcome::Success(SuccessDetail::Link { .. }) => "OK".green().to_string(),
        ProbeOutcome::Failure(error) => format!("{} - {error}", "FAILED".red()),
        ProbeOutcome::Skipped(reason) => format!("{} - {reason}", "SKIPPED".yellow()),
    };

    format!("  Checking {shown}... {verdict}")
}

fn truncate_url(url: &str) -> String {
    if url.chars().count() > PROGRESS_URL_WIDTH {
        let head: String = url.chars().take(PROGRESS_URL_WIDTH).collect();
        format!("{head}...")
    } else {
        url.to_string()
    }
}
