//! Submission of signed envelopes to the exchange endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};
use venue_core::types::SignedEnvelope;
use venue_core::{Config, Error, Result};

/// Successful exchange response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeResponse {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "status", content = "response", rename_all = "lowercase")]
enum RawExchangeResponse {
    Ok(ExchangeResponse),
    Err(String),
}

/// Where signed envelopes go. Implementations do not retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn submit(&self, envelope: &SignedEnvelope) -> Result<ExchangeResponse>;
}

/// JSON-over-HTTP transport posting to `{base_url}/exchange`.
pub struct HttpTransport {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| Error::Config {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.api.base_url.clone(), config.api.request_timeout)
    }

    pub fn exchange_url(&self) -> String {
        format!("{}/exchange", self.base_url)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn submit(&self, envelope: &SignedEnvelope) -> Result<ExchangeResponse> {
        let url = self.exchange_url();
        debug!(url = %url, action = %envelope.action.kind(), nonce = envelope.nonce, "Submitting envelope");

        let response = self
            .http_client
            .post(&url)
            .json(envelope)
            .send()
            .await
            .map_err(|e| Error::Transport {
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| Error::Transport {
            message: e.to_string(),
        })?;

        parse_exchange_response(status, &body)
    }
}

/// Map an HTTP status and body to the typed result.
pub fn parse_exchange_response(status: u16, body: &str) -> Result<ExchangeResponse> {
    if !(200..300).contains(&status) {
        warn!(status, "Exchange returned HTTP error");
        return Err(Error::Api {
            message: format!("Exchange request failed: {} - {}", status, body),
            status: Some(status),
        });
    }

    let raw: RawExchangeResponse = serde_json::from_str(body).map_err(|e| Error::Api {
        message: format!("Unexpected exchange response '{}': {}", body, e),
        status: Some(status),
    })?;

    match raw {
        RawExchangeResponse::Ok(response) => Ok(response),
        RawExchangeResponse::Err(message) => {
            warn!(message = %message, "Exchange rejected request");
            Err(Error::Api {
                message,
                status: Some(status),
            })
        }
    }
}
