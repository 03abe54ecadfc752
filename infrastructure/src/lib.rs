//! Infrastructure layer for ai-council
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod providers;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig, FileServerConfig, FileUpstreamConfig};
pub use providers::{
    AnthropicGateway, GoogleGateway, OpenAiGateway, PerplexityGateway, build_http_client,
    default_gateways,
};
