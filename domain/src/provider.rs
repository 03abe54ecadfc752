//! Provider value object - the fixed council roster

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// The four AI completion services a council run consults (Value Object)
///
/// The roster is closed: a finished run carries exactly one answer per
/// variant, keyed by [`Provider::as_str`]. Variant order is the slot order
/// of the result envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Provider {
    /// OpenAI chat completions (`gpt4` slot)
    Gpt4,
    /// Anthropic messages (`claude` slot)
    Claude,
    /// Google generative language (`gemini` slot)
    Gemini,
    /// Perplexity chat completions (`perplexity` slot)
    Perplexity,
}

/// Error returned when a provider name is not part of the roster
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown provider: {0}")]
pub struct UnknownProvider(pub String);

impl Provider {
    /// All providers, in result-slot order
    pub const ALL: [Provider; 4] = [
        Provider::Gpt4,
        Provider::Claude,
        Provider::Gemini,
        Provider::Perplexity,
    ];

    /// Get the result-slot key for this provider
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Gpt4 => "gpt4",
            Provider::Claude => "claude",
            Provider::Gemini => "gemini",
            Provider::Perplexity => "perplexity",
        }
    }

    /// Get the upstream service label used when tagging error messages
    pub fn service_name(&self) -> &'static str {
        match self {
            Provider::Gpt4 => "OpenAI",
            Provider::Claude => "Anthropic",
            Provider::Gemini => "Google",
            Provider::Perplexity => "Perplexity",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Provider {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "gpt4" => Provider::Gpt4,
            "claude" => Provider::Claude,
            "gemini" => Provider::Gemini,
            "perplexity" => Provider::Perplexity,
            other => return Err(UnknownProvider(other.to_string())),
        })
    }
}

impl Serialize for Provider {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Provider {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
