//! OpenAI chat-completions adapter, answering the `gpt4` council slot.

use async_trait::async_trait;
use council_application::ports::provider_gateway::{GatewayError, ProviderGateway};
use council_domain::{Problem, Provider};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

const MODEL: &str = "gpt-4o-mini";
const SYSTEM_PROMPT: &str =
    "You are a helpful AI assistant providing concise, actionable advice for decision-making.";
const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const MAX_TOKENS: u32 = 300;
const TEMPERATURE: f64 = 0.7;

/// Gateway to the OpenAI chat completions API.
pub struct OpenAiGateway {
    client: Client,
    base_url: String,
}

impl OpenAiGateway {
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
        format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ProviderGateway for OpenAiGateway {
    fn provider(&self) -> Provider {
        Provider::Gpt4
    }

    async fn complete(&self, problem: &Problem, api_key: &str) -> Result<String, GatewayError> {
        let payload = ChatRequest {
            model: MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: problem.content(),
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        debug!("Sending completion request to {}", self.endpoint_url());
        let response = self
            .client
            .post(self.endpoint_url())
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| GatewayError::transport(Provider::Gpt4, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::transport(Provider::Gpt4, e))?;

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
    GatewayError::rejected(Provider::Gpt4, detail)
}

fn extract_text(body: &str) -> Result<String, GatewayError> {
    let response: ChatResponse = serde_json::from_str(body).map_err(|e| {
        GatewayError::unexpected_shape(Provider::Gpt4, format!("response decode failed: {e}"))
    })?;

    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| {
            GatewayError::unexpected_shape(Provider::Gpt4, "no choices in response body")
        })
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f64,
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
struct ErrorEnvelope {
    #[serde(default)]
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}
