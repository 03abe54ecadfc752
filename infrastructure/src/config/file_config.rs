//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly; defaults apply per field.

use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// HTTP server settings
    pub server: FileServerConfig,
    /// Upstream provider settings
    pub upstream: FileUpstreamConfig,
}

/// Server configuration from TOML (`[server]` section)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    /// Socket address the HTTP server listens on
    pub bind: String,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8787".to_string(),
        }
    }
}

/// Upstream provider configuration from TOML (`[upstream]` section)
///
/// Base URLs default to each provider's production endpoint when unset;
/// overriding them is mainly useful for proxies and local stand-ins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileUpstreamConfig {
    /// Per-request timeout applied to every provider call, in seconds
    pub timeout_secs: u64,
    /// Base URL override for the OpenAI API
    pub openai_base_url: Option<String>,
    /// Base URL override for the Anthropic API
    pub anthropic_base_url: Option<String>,
    /// Base URL override for the Google generative language API
    pub google_base_url: Option<String>,
    /// Base URL override for the Perplexity API
    pub perplexity_base_url: Option<String>,
}

impl Default for FileUpstreamConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 60,
            openai_base_url: None,
            anthropic_base_url: None,
            google_base_url: None,
            perplexity_base_url: None,
        }
    }
}
