//! HTTP adapters for the four upstream completion services
//!
//! One gateway per council slot, all sharing a single [`reqwest::Client`].
//! Base URLs can be overridden through the `[upstream]` config section.

pub mod anthropic;
pub mod google;
pub mod openai;
pub mod perplexity;

pub use anthropic::AnthropicGateway;
pub use google::GoogleGateway;
pub use openai::OpenAiGateway;
pub use perplexity::PerplexityGateway;

use crate::config::FileUpstreamConfig;
use council_application::ports::provider_gateway::ProviderGateway;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Build the HTTP client shared by every gateway.
///
/// The timeout bounds each upstream request as a whole; a provider that
/// exceeds it settles as a transport failure in its own slot.
pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder().timeout(timeout).build()
}

/// Assemble the full gateway roster in council slot order.
pub fn default_gateways(
    client: &Client,
    upstream: &FileUpstreamConfig,
) -> Vec<Arc<dyn ProviderGateway>> {
    let openai = match &upstream.openai_base_url {
        Some(url) => OpenAiGateway::with_base_url(client.clone(), url.clone()),
        None => OpenAiGateway::new(client.clone()),
    };
    let anthropic = match &upstream.anthropic_base_url {
        Some(url) => AnthropicGateway::with_base_url(client.clone(), url.clone()),
        None => AnthropicGateway::new(client.clone()),
    };
    let google = match &upstream.google_base_url {
        Some(url) => GoogleGateway::with_base_url(client.clone(), url.clone()),
        None => GoogleGateway::new(client.clone()),
    };
    let perplexity = match &upstream.perplexity_base_url {
        Some(url) => PerplexityGateway::with_base_url(client.clone(), url.clone()),
        None => PerplexityGateway::new(client.clone()),
    };

    vec![
        Arc::new(openai),
        Arc::new(anthropic),
        Arc::new(google),
        Arc::new(perplexity),
    ]
}
