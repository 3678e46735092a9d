use std::sync::atomic::{AtomicU64, Ordering};

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::NarrativeRequest;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{error}: {message} (HTTP {status})")]
    Server {
        status: u16,
        error: String,
        message: String,
    },
}

#[derive(Debug, Deserialize)]
struct ServerErrorBody {
    error: String,
    message: String,
}

/// Hands out monotonically increasing request numbers
///
/// Only the most recently issued number is current; a response carrying
/// any older number must be discarded.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_latest(&self, sequence: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == sequence
    }
}

/// Result of a settled narrative request
#[derive(Debug, Clone, PartialEq)]
pub enum NarrativeOutcome {
    /// Response to the most recently issued request
    Fresh { sequence: u64, narrative: Value },
    /// A newer request was issued while this one was in flight
    Stale { sequence: u64 },
}

/// HTTP client for `POST /generate-narrative`
pub struct NarrativeClient {
    base_url: String,
    client: Client,
    sequencer: RequestSequencer,
}

impl NarrativeClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::builder().build()?,
            sequencer: RequestSequencer::new(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request a narrative, discarding the outcome if a newer request was issued meanwhile
    pub async fn generate(&self, text: &str) -> Result<NarrativeOutcome, ClientError> {
        let sequence = self.sequencer.issue();
        info!("Requesting narrative #{} ({} chars)", sequence, text.len());

        let result = self.send(text).await;

        if !self.sequencer.is_latest(sequence) {
            debug!("Discarding narrative #{}: superseded", sequence);
            return Ok(NarrativeOutcome::Stale { sequence });
        }

        result.map(|narrative| NarrativeOutcome::Fresh { sequence, narrative })
    }

    async fn send(&self, text: &str) -> Result<Value, ClientError> {
        let response = self
            .client
            .post(format!("{}/generate-narrative", self.base_url))
            .json(&NarrativeRequest::new(text))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<ServerErrorBody>().await.ok();
            return Err(match body {
                Some(body) => ClientError::Server {
                    status: status.as_u16(),
                    error: body.error,
                    message: body.message,
                },
                None => ClientError::Server {
                    status: status.as_u16(),
                    error: "HTTP error".to_string(),
                    message: format!("status: {}", status),
                },
            });
        }

        Ok(response.json::<Value>().await?)
    }
}
