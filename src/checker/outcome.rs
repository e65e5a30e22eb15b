// src/checker/outcome.rs
// =============================================================================
// Data types shared by every stage of the checker:
//
// - CheckTarget: one thing to probe (an RPC endpoint or a documentation link)
// - ProbeOutcome: the single result each target produces
// - ProbeError: why a probe failed
//
// Every target yields exactly one ProbeOutcome. Network and protocol problems
// are values of ProbeError, never panics or escaping errors.
// =============================================================================

use std::error::Error as _;

use thiserror::Error;

/// Which pass a target belongs to. Endpoints and links are never merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Endpoint,
    Link,
}

/// A URL scheduled for probing, immutable once extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckTarget {
    pub kind: TargetKind,
    pub value: String,
    /// File the URL came from, relative to the docs root. Endpoints have none.
    pub source: Option<String>,
    /// Link label, anchor text, or "code/text" for bare URLs.
    pub context: Option<String>,
}

impl CheckTarget {
    pub fn endpoint(value: impl Into<String>) -> Self {
        Self {
            kind: TargetKind::Endpoint,
            value: value.into(),
            source: None,
            context: None,
        }
    }

    pub fn link(
        value: impl Into<String>,
        source: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self {
            kind: TargetKind::Link,
            value: value.into(),
            source: Some(source.into()),
            context: Some(context.into()),
        }
    }
}

/// What a successful probe learned about its target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuccessDetail {
    /// A documentation link answered with a status in [200, 400)
    Link { status: u16, final_url: String },
    /// An RPC root answered its health check
    Endpoint {
        head_block: String,
        chain_id: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Success(SuccessDetail),
    Failure(ProbeError),
    /// The URL (or a redirect hop) matched a skip rule; carries the rule's reason
    Skipped(String),
}

#[cfg(test)]
impl ProbeOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, ProbeOutcome::Failure(_))
    }
}

/// Reasons a single probe can fail.
///
/// The Display text is what ends up in the failure listing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    #[error("Request timeout")]
    Timeout,

    #[error("Could not resolve hostname")]
    Dns,

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("SSL certificate error: {0}")]
    Tls(String),

    #[error("{0}")]
    Request(String),

    #[error("Status: {0}")]
    Status(u16),

    #[error("Too many redirects (more than {0} hops)")]
    TooManyRedirects(usize),

    #[error("Invalid redirect location: {0}")]
    InvalidRedirect(String),

    #[error("Invalid JSON in response: {0}")]
    InvalidJson(String),

    #[error("Response has no head_block_num")]
    MissingHeadBlock,
}

// reqwest folds every failure mode into one error type; split it back out
// into the categories the report distinguishes.
impl From<reqwest::Error> for ProbeError {
    fn from(error: reqwest::Error) -> Self {
        let error_string = full_message(&error);
        let lowered = error_string.to_lowercase();

        if error.is_timeout() {
            ProbeError::Timeout
        } else if lowered.contains("certificate") || lowered.contains("tls") {
            ProbeError::Tls(error_string)
        } else if error.is_connect() {
            if lowered.contains("dns") {
                ProbeError::Dns
            } else {
                ProbeError::Connect(error_string)
            }
        } else {
            ProbeError::Request(error_string)
        }
    }
}

// reqwest's Display stops at the outermost layer; the useful part (dns error,
// connection refused, ...) sits further down the source chain.
fn full_message(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_messages() {
        assert_eq!(ProbeError::Timeout.to_string(), "Request timeout");
        assert_eq!(ProbeError::Status(404).to_string(), "Status: 404");
        assert_eq!(
            ProbeError::TooManyRedirects(10).to_string(),
            "Too many redirects (more than 10 hops)"
        );
    }

    #[test]
    fn test_only_failures_count_as_failures() {
        assert!(ProbeOutcome::Failure(ProbeError::Status(500)).is_failure());
        assert!(!ProbeOutcome::Skipped("example host".to_string()).is_failure());
        assert!(!ProbeOutcome::Success(SuccessDetail::Link {
            status: 200,
            final_url: "https://docs.example.org".to_string(),
        })
        .is_failure());
    }

    #[test]
    fn test_link_target_carries_source_and_context() {
        let target = CheckTarget::link("https://a.org", "guide/intro.md", "Docs");
        assert_eq!(target.kind, TargetKind::Link);
        assert_eq!(target.source.as_deref(), Some("guide/intro.md"));
        assert_eq!(target.context.as_deref(), Some("Docs"));

        let endpoint = CheckTarget::endpoint("https://rpc.a.org");
        assert_eq!(endpoint.kind, TargetKind::Endpoint);
        assert!(endpoint.source.is_none());
    }
}
