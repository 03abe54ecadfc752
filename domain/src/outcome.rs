//! Council outcome value objects - per-provider answers and the merged result

use crate::provider::Provider;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The settled answer from a single provider (Value Object)
///
/// Exactly one of the two variants holds per provider per run. Failures are
/// data, not faults: a failed provider fills its slot like any other, and a
/// run with four failures is still a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ProviderAnswer {
    /// The provider returned generated text
    Success { text: String },
    /// The provider call failed; `message` describes why
    Failure { message: String },
}

impl ProviderAnswer {
    /// Creates a successful answer carrying the provider's generated text.
    pub fn success(text: impl Into<String>) -> Self {
        Self::Success { text: text.into() }
    }

    /// Creates a failed answer carrying a human-readable description.
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    /// Returns `true` if the provider answered successfully.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The generated text, if this is a success.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Success { text } => Some(text),
            Self::Failure { .. } => None,
        }
    }

    /// The failure description, if this is a failure.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { message } => Some(message),
        }
    }
}

/// The merged result of one council run (Value Object)
///
/// Maps each consulted provider to its answer. A finished run holds an entry
/// for every member of [`Provider::ALL`], failures included.
/// Serializes as a flat object keyed by result-slot name, in slot order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CouncilOutcome {
    answers: BTreeMap<Provider, ProviderAnswer>,
}

impl CouncilOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one provider's settled answer, replacing any earlier entry
    pub fn record(&mut self, provider: Provider, answer: ProviderAnswer) {
        self.answers.insert(provider, answer);
    }

    /// Get the answer recorded for a provider, if it has settled
    pub fn answer(&self, provider: Provider) -> Option<&ProviderAnswer> {
        self.answers.get(&provider)
    }

    /// True when every member of the fixed roster has an entry
    pub fn is_complete(&self) -> bool {
        Provider::ALL.iter().all(|p| self.answers.contains_key(p))
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Iterate answers in slot order
    pub fn iter(&self) -> impl Iterator<Item = (Provider, &ProviderAnswer)> {
        self.answers.iter().map(|(provider, answer)| (*provider, answer))
    }
}
