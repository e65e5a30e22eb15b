// src/checker/mod.rs
// =============================================================================
// This module contains the link and endpoint checking logic.
//
// Submodules:
// - outcome: targets, outcomes and probe errors shared by everything below
// - markdown: extracts URLs from Markdown text
// - html: extracts <a href> anchors from raw HTML inside Markdown
// - filter: skip rules and URL de-duplication
// - http: the Prober and its link check (HEAD, redirects, GET fallback)
// - endpoint: the RPC endpoint health check
// =============================================================================

mod endpoint;
mod filter;
mod html;
mod http;
mod markdown;
mod outcome;

#[cfg(test)]
pub(crate) mod test_server;

pub use filter::{dedup_by_url, SkipRules};
pub use http::Prober;
pub use markdown::extract_markdown_links;
pub use outcome::{CheckTarget, ProbeError, ProbeOutcome, SuccessDetail, TargetKind};
