//! Perplexity chat-completions adapter, answering the `perplexity` slot.
//!
//! The wire shape follows the OpenAI chat contract, but error bodies carry
//! their message at the top level instead of inside an `error` object.

use async_trait::async_trait;
use council_application::ports::provider_gateway::{GatewayError, ProviderGateway};
use council_domain::{Problem, Provider};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

const MODEL: &str = "llama-3.1-sonar-small-128k-online";
const DEFAULT_BASE_URL: &str = "https://api.perplexity.ai";

/// Gateway to the Perplexity chat completions API.
pub struct PerplexityGateway {
    client: Client,
    base_url: String,
}

impl PerplexityGateway {
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
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ProviderGateway for PerplexityGateway {
    fn provider(&self) -> Provider {
        Provider::Perplexity
    }

    async fn complete(&self, problem: &Problem, api_key: &str) -> Result<String, GatewayError> {
        let payload = ChatRequest {
            model: MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content: problem.content(),
            }],
        };

        debug!("Sending completion request to {}", self.endpoint_url());
        let response = self
            .client
            .post(self.endpoint_url())
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| GatewayError::transport(Provider::Perplexity, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::transport(Provider::Perplexity, e))?;

        if !status.is_success() {
            return Err(rejected(status, &body));
        }

        extract_text(&body)
    }
}

fn rejected(status: StatusCode, body: &str) -> GatewayError {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|error| error.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| format!("HTTP {status}"));
    GatewayError::rejected(Provider::Perplexity, detail)
}

fn extract_text(body: &str) -> Result<String, GatewayError> {
    let response: ChatResponse = serde_json::from_str(body).map_err(|e| {
        GatewayError::unexpected_shape(
            Provider::Perplexity,
            format!("response decode failed: {e}"),
        )
    })?;

    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| {
            GatewayError::unexpected_shape(Provider::Perplexity, "no choices in response body")
        })
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}
