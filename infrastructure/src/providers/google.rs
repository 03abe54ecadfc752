//! Google Gemini adapter, answering the `gemini` council slot.
//!
//! Unlike the other providers, Google authenticates through a `key` query
//! parameter rather than a request header.

use async_trait::async_trait;
use council_application::ports::provider_gateway::{GatewayError, ProviderGateway};
use council_domain::{Problem, Provider};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

const MODEL: &str = "gemini-pro";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Gateway to the Google generative language API.
pub struct GoogleGateway {
    client: Client,
    base_url: String,
}

impl GoogleGateway {
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
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            MODEL
        )
    }
}

#[async_trait]
impl ProviderGateway for GoogleGateway {
    fn provider(&self) -> Provider {
        Provider::Gemini
    }

    async fn complete(&self, problem: &Problem, api_key: &str) -> Result<String, GatewayError> {
        let payload = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: problem.content(),
                }],
            }],
        };

        // Log the bare endpoint; the key travels in the query string.
        debug!("Sending completion request to {}", self.endpoint_url());
        let response = self
            .client
            .post(self.endpoint_url())
            .query(&[("key", api_key)])
            .json(&payload)
            .send()
            .await
            .map_err(|e| GatewayError::transport(Provider::Gemini, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::transport(Provider::Gemini, e))?;

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
    GatewayError::rejected(Provider::Gemini, detail)
}

fn extract_text(body: &str) -> Result<String, GatewayError> {
    let response: GenerateContentResponse = serde_json::from_str(body).map_err(|e| {
        GatewayError::unexpected_shape(Provider::Gemini, format!("response decode failed: {e}"))
    })?;

    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .ok_or_else(|| {
            GatewayError::unexpected_shape(
                Provider::Gemini,
                "no candidate text part in response body",
            )
        })
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
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
