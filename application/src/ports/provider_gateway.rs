//! Provider Gateway port - interface to a third-party completion service
//!
//! Each implementation wraps exactly one upstream provider. The council
//! use case only sees this trait, so providers can be added, mocked, or
//! removed without touching the orchestration logic.

use async_trait::async_trait;
use council_domain::{Problem, Provider};
use thiserror::Error;

/// Errors from provider gateway operations
///
/// Every variant carries the upstream service name baked into its message,
/// so `to_string()` yields the exact text recorded in the failed slot.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The service answered with a non-success status
    #[error("{service} error: {message}")]
    Rejected {
        service: &'static str,
        message: String,
    },

    /// The request never completed (connect failure, timeout, aborted body)
    #[error("{service} request failed: {message}")]
    Transport {
        service: &'static str,
        message: String,
    },

    /// A success response that does not contain the expected answer text
    #[error("{service} returned an unexpected response shape: {message}")]
    UnexpectedShape {
        service: &'static str,
        message: String,
    },
}

impl GatewayError {
    /// Upstream refused the request (auth failure, quota, bad model, ...)
    pub fn rejected(provider: Provider, message: impl Into<String>) -> Self {
        Self::Rejected {
            service: provider.service_name(),
            message: message.into(),
        }
    }

    /// The HTTP exchange itself broke down
    pub fn transport(provider: Provider, cause: impl std::fmt::Display) -> Self {
        Self::Transport {
            service: provider.service_name(),
            message: cause.to_string(),
        }
    }

    /// A 2xx response whose body is missing the answer text
    pub fn unexpected_shape(provider: Provider, message: impl Into<String>) -> Self {
        Self::UnexpectedShape {
            service: provider.service_name(),
            message: message.into(),
        }
    }
}

/// Port for querying one completion provider
#[async_trait]
pub trait ProviderGateway: Send + Sync {
    /// Which council slot this gateway answers for
    fn provider(&self) -> Provider;

    /// Send the problem upstream and return the answer text
    ///
    /// The key is passed per call rather than held by the gateway, because
    /// every council request carries its own credentials.
    async fn complete(&self, problem: &Problem, api_key: &str) -> Result<String, GatewayError>;
}
