// src/checker/http.rs
// =============================================================================
// This module checks whether documentation links are reachable.
//
// Key functionality:
// - HEAD first (no body download), GET only when the server answers 405
// - Redirects (301/302/307/308) are followed here rather than by reqwest, so
//   skip rules apply to every hop and the hop count is bounded
// - Every failure mode becomes a ProbeOutcome::Failure; nothing escapes
//
// Each request gets its own timeout budget: a chain of three redirects may
// take up to four timeouts in total.
// =============================================================================

use anyhow::{Context, Result};
use reqwest::redirect::Policy;
use reqwest::{header, Client, Response, StatusCode};
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::filter::SkipRules;
use super::outcome::{CheckTarget, ProbeError, ProbeOutcome, SuccessDetail, TargetKind};
use crate::config::CheckerConfig;

/// Redirect statuses the prober follows when a Location header is present
const FOLLOWED_REDIRECTS: [StatusCode; 4] = [
    StatusCode::MOVED_PERMANENTLY,
    StatusCode::FOUND,
    StatusCode::TEMPORARY_REDIRECT,
    StatusCode::PERMANENT_REDIRECT,
];

/// Issues probes for one run. Cheap to share by reference across the pool.
pub struct Prober {
    pub(super) client: Client,
    skip_rules: SkipRules,
    max_redirects: usize,
}

impl Prober {
    /// Builds the shared HTTP client.
    ///
    /// # Errors
    /// Fails only if the TLS backend cannot be initialised.
    pub fn new(config: &CheckerConfig, skip_rules: SkipRules) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .redirect(Policy::none())
            .user_agent(config.user_agent.clone())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            skip_rules,
            max_redirects: config.max_redirects,
        })
    }

    /// Probes a target according to its kind
    pub async fn probe(&self, target: &CheckTarget) -> ProbeOutcome {
        match target.kind {
            TargetKind::Endpoint => self.probe_endpoint(&target.value).await,
            TargetKind::Link => self.probe_link(&target.value).await,
        }
    }

    // Checks one documentation link
    //
    // Steps, repeated per redirect hop:
    // 1. Skip-rule match -> Skipped (no request is sent)
    // 2. HEAD request
    // 3. Followed redirect with Location -> resolve and go again
    // 4. [200, 400) -> Success, 405 -> GET fallback, anything else -> Failure
    pub async fn probe_link(&self, url: &str) -> ProbeOutcome {
        let mut current = url.to_string();
        let mut hops = 0;

        loop {
            if let Some(reason) = self.skip_rules.matching_reason(&current) {
                return ProbeOutcome::Skipped(reason.to_string());
            }

            let response = match self.client.head(&current).send().await {
                Ok(response) => response,
                Err(e) => return ProbeOutcome::Failure(e.into()),
            };
            let status = response.status();

            if FOLLOWED_REDIRECTS.contains(&status) {
                if let Some(location) = location_header(&response) {
                    if hops >= self.max_redirects {
                        return ProbeOutcome::Failure(ProbeError::TooManyRedirects(
                            self.max_redirects,
                        ));
                    }
                    let next = match resolve_location(&current, location) {
                        Ok(next) => next,
                        Err(e) => return ProbeOutcome::Failure(e),
                    };
                    debug!(
                        from = %current,
                        to = %next,
                        status = status.as_u16(),
                        "following redirect"
                    );
                    current = next;
                    hops += 1;
                    continue;
                }
            }

            return self.finish_link(current, status).await;
        }
    }

    // Turns the final HEAD status into an outcome, retrying 405 as GET
    async fn finish_link(&self, url: String, status: StatusCode) -> ProbeOutcome {
        if is_reachable(status) {
            return link_success(url, status);
        }

        if status != StatusCode::METHOD_NOT_ALLOWED {
            return ProbeOutcome::Failure(ProbeError::Status(status.as_u16()));
        }

        debug!(url = %url, "HEAD not allowed, retrying with GET");
        match self.client.get(&url).send().await {
            Ok(response) if is_reachable(response.status()) => {
                link_success(url, response.status())
            }
            Ok(response) => ProbeOutcome::Failure(ProbeError::Status(response.status().as_u16())),
            Err(e) => ProbeOutcome::Failure(e.into()),
        }
    }
}

fn is_reachable(status: StatusCode) -> bool {
    (200..400).contains(&status.as_u16())
}

fn link_success(final_url: String, status: StatusCode) -> ProbeOutcome {
    ProbeOutcome::Success(SuccessDetail::Link {
        status: status.as_u16(),
        final_url,
    })
}

fn location_header(response: &Response) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
}

// Resolves a Location header against the URL that produced it
//
// Examples (current = "https://docs.test/a/b"):
//   "https://other.test/x" -> "https://other.test/x" (kept as written)
//   "/login"               -> "https://docs.test/login"
//   "c"                    -> "https://docs.test/a/c"
fn resolve_location(current: &str, location: &str) -> Result<String, ProbeError> {
    if Url::parse(location).is_ok() {
        return Ok(location.to_string());
    }

    Url::parse(current)
        .and_then(|base| base.join(location))
        .map(String::from)
        .map_err(|_| ProbeError::InvalidRedirect(location.to_string()))
}
