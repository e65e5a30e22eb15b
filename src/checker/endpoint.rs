// src/checker/endpoint.rs
// =============================================================================
// Health check for blockchain RPC endpoints.
//
// An endpoint is healthy when GET <endpoint>/v1/chain/get_info answers 200
// with a JSON object whose `head_block_num` is truthy. There are no retries
// and no redirects are followed.
// =============================================================================

use reqwest::StatusCode;
use serde_json::Value;

use super::http::Prober;
use super::outcome::{ProbeError, ProbeOutcome, SuccessDetail};

const HEALTH_PATH: &str = "v1/chain/get_info";

/// Characters of the chain id shown in the progress line
const CHAIN_ID_PREFIX: usize = 16;

impl Prober {
    pub async fn probe_endpoint(&self, endpoint: &str) -> ProbeOutcome {
        match self.fetch_chain_info(endpoint).await {
            Ok(detail) => ProbeOutcome::Success(detail),
            Err(e) => ProbeOutcome::Failure(e),
        }
    }

    async fn fetch_chain_info(&self, endpoint: &str) -> Result<SuccessDetail, ProbeError> {
        let response = self.client.get(health_url(endpoint)).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ProbeError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        parse_chain_info(&body)
    }
}

// "https://rpc.test" and "https://rpc.test//" both become
// "https://rpc.test/v1/chain/get_info"
pub fn health_url(endpoint: &str) -> String {
    format!("{}/{}", endpoint.trim_end_matches('/'), HEALTH_PATH)
}

fn parse_chain_info(body: &str) -> Result<SuccessDetail, ProbeError> {
    let info: Value =
        serde_json::from_str(body).map_err(|e| ProbeError::InvalidJson(e.to_string()))?;
    let Value::Object(info) = info else {
        return Err(ProbeError::InvalidJson("expected a JSON object".to_string()));
    };

    let head_block = match info.get("head_block_num") {
        Some(value) if is_truthy(value) => display_value(value),
        _ => return Err(ProbeError::MissingHeadBlock),
    };

    let chain_id = info.get("chain_id").filter(|v| !v.is_null()).map(|v| {
        let id: String = display_value(v).chars().take(CHAIN_ID_PREFIX).collect();
        format!("{id}...")
    });

    Ok(SuccessDetail::Endpoint {
        head_block,
        chain_id,
    })
}

// JSON truthiness: null, false, 0, "" are falsy
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
