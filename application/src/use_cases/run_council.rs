//! Run Council use case
//!
//! Orchestrates one council run: fan the problem out to every configured
//! provider in parallel, let each succeed or fail on its own, and merge
//! whatever comes back into a single outcome.

use crate::ports::provider_gateway::ProviderGateway;
use council_domain::{ApiKeySet, CouncilOutcome, Problem, ProviderAnswer};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that abort a council run before any provider is contacted
///
/// Individual provider failures never surface here; they settle into the
/// failed provider's own slot of the outcome instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunCouncilError {
    #[error("Missing problem or API keys")]
    MissingInput,

    #[error("No providers configured")]
    NoProviders,
}

/// Input for the RunCouncil use case
#[derive(Debug, Clone)]
pub struct RunCouncilInput {
    /// Raw problem text, not yet validated
    pub problem: String,
    /// Caller-supplied API keys, one per upstream service
    pub keys: ApiKeySet,
}

impl RunCouncilInput {
    pub fn new(problem: impl Into<String>, keys: ApiKeySet) -> Self {
        Self {
            problem: problem.into(),
            keys,
        }
    }
}

/// Use case for running a council consultation
pub struct RunCouncilUseCase {
    gateways: Vec<Arc<dyn ProviderGateway>>,
}

impl RunCouncilUseCase {
    pub fn new(gateways: Vec<Arc<dyn ProviderGateway>>) -> Self {
        Self { gateways }
    }

    /// Execute the use case: validate, fan out, settle, merge
    ///
    /// Once validation passes this always resolves to a full outcome, even
    /// if every provider fails. An `Err` means nothing was sent upstream.
    pub async fn execute(
        &self,
        input: RunCouncilInput,
    ) -> Result<CouncilOutcome, RunCouncilError> {
        let problem =
            Problem::try_new(input.problem).ok_or(RunCouncilError::MissingInput)?;

        if self.gateways.is_empty() {
            return Err(RunCouncilError::NoProviders);
        }

        info!(
            "Starting council with {} providers: {}",
            self.gateways.len(),
            problem.preview(50)
        );

        // Fan out as detached tasks. If this future is dropped mid-run,
        // the dispatched calls keep running instead of being aborted with it.
        let mut handles = Vec::with_capacity(self.gateways.len());

        for gateway in &self.gateways {
            let gateway = Arc::clone(gateway);
            let problem = problem.clone();
            let api_key = input.keys.for_provider(gateway.provider()).to_string();
            let provider = gateway.provider();

            handles.push((
                provider,
                tokio::spawn(async move { gateway.complete(&problem, &api_key).await }),
            ));
        }

        let mut outcome = CouncilOutcome::new();

        for (provider, handle) in handles {
            match handle.await {
                Ok(Ok(text)) => {
                    info!("Provider {} responded successfully", provider);
                    outcome.record(provider, ProviderAnswer::success(text));
                }
                Ok(Err(e)) => {
                    warn!("Provider {} failed: {}", provider, e);
                    outcome.record(provider, ProviderAnswer::failure(e.to_string()));
                }
                Err(e) => {
                    warn!("Provider {} task did not settle: {}", provider, e);
                    outcome.record(
                        provider,
                        ProviderAnswer::failure(format!(
                            "{} task did not settle",
                            provider.service_name()
                        )),
                    );
                }
            }
        }

        Ok(outcome)
    }
}
