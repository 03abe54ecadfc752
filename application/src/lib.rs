//! Application layer for ai-council
//!
//! This crate contains the council use case and its port definitions.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::provider_gateway::{GatewayError, ProviderGateway};
pub use use_cases::run_council::{RunCouncilError, RunCouncilInput, RunCouncilUseCase};
