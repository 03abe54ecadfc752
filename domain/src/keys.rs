//! Per-run API key material

use crate::provider::Provider;
use std::fmt;

/// The provider API keys supplied with a single council run (Value Object)
///
/// Keys are opaque and unvalidated here: an absent or malformed key is still
/// handed to its adapter, where the upstream service rejects it and the
/// resulting failure lands in that provider's slot. Absent keys default to
/// empty strings.
///
/// This type deliberately carries no serde support; the transport layer owns
/// deserialization and converts. Keys live only for the duration of one run.
#[derive(Clone, Default)]
pub struct ApiKeySet {
    pub openai: String,
    pub anthropic: String,
    pub google: String,
    pub perplexity: String,
}

impl ApiKeySet {
    pub fn new(
        openai: impl Into<String>,
        anthropic: impl Into<String>,
        google: impl Into<String>,
        perplexity: impl Into<String>,
    ) -> Self {
        Self {
            openai: openai.into(),
            anthropic: anthropic.into(),
            google: google.into(),
            perplexity: perplexity.into(),
        }
    }

    /// Select the key belonging to one provider
    pub fn for_provider(&self, provider: Provider) -> &str {
        match provider {
            Provider::Gpt4 => &self.openai,
            Provider::Claude => &self.anthropic,
            Provider::Gemini => &self.google,
            Provider::Perplexity => &self.perplexity,
        }
    }
}

// Key material must never reach logs; Debug reports slot presence only.
impl fmt::Debug for ApiKeySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeySet")
            .field("openai", &key_state(&self.openai))
            .field("anthropic", &key_state(&self.anthropic))
            .field("google", &key_state(&self.google))
            .field("perplexity", &key_state(&self.perplexity))
            .finish()
    }
}

fn key_state(key: &str) -> &'static str {
    if key.is_empty() { "unset" } else { "set" }
}
