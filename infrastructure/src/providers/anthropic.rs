//! Anthropic messages adapter, answering the `claude` council slot.

use async_trait::async_trait;
use council_application::ports::provider_gateway::{GatewayError, ProviderGateway};
use council_domain::{Problem, Provider};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

const MODEL: &str = "claude-3-5-sonnet-20241022";
const API_VERSION: &str = "2023-06-01";
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const MAX_TOKENS: u32 = 300;

/// Gateway to the Anthropic messages API.
pub struct AnthropicGateway {
    client: Client,
    base_url: String,
}

impl AnthropicGateway {
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, DEFAULT_BASE_URL)
    }

    /// Point the gateway at a different host (tests, config override).
    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn endpoint_url(&self) -> String {
        format!("{}/v1/messages", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ProviderGateway for AnthropicGateway {
    fn provider(&self) -> Provider {
        Provider::Claude
    }

    async fn complete(&self, problem: &Problem, api_key: &str) -> Result<String, GatewayError> {
        let payload = MessagesRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            messages: vec![RequestMessage {
                role: "user",
                content: problem.content(),
            }],
        };

        debug!("Sending completion request to {}", self.endpoint_url());
        let response = self
            .client
            .post(self.endpoint_url())
            .header("x-api-key", api_key)
            .header("anthropic-version", API_VERSION)
            .json(&payload)
            .send()
            .await
            .map_err(|e| GatewayError::transport(Provider::Claude, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::transport(Provider::Claude, e))?;

        if !status.is_success() {
            return Err(rejected(status, &body));
        }

        extract_text(&body)
    }
}

fn rejected(status: StatusCode, body: &str) -> GatewayError {
    let detail = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error)
        .map(|error| error.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| format!("HTTP {status}"));
    GatewayError::rejected(Provider::Claude, detail)
}

fn extract_text(body: &str) -> Result<String, GatewayError> {
    let response: MessagesResponse = serde_json::from_str(body).map_err(|e| {
        GatewayError::unexpected_shape(Provider::Claude, format!("response decode failed: {e}"))
    })?;

    // Only the first content block is read; it must carry text.
    response
        .content
        .into_iter()
        .next()
        .ok_or_else(|| {
            GatewayError::unexpected_shape(Provider::Claude, "no content blocks in response body")
        })?
        .text
        .ok_or_else(|| {
            GatewayError::unexpected_shape(Provider::Claude, "first content block carries no text")
        })
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<RequestMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}
