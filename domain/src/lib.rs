//! Domain layer for ai-council
//!
//! This crate contains the core entities and value objects for a council
//! run. It has no dependencies on infrastructure or transport concerns.
//!
//! # Core Concepts
//!
//! ## Council
//!
//! A council run puts one decision [`Problem`] before every member of a
//! fixed [`Provider`] roster at once. Each provider settles on its own,
//! success or failure, and the merged [`CouncilOutcome`] always carries
//! one [`ProviderAnswer`] per roster member. One slow or broken provider
//! never silences the rest.

pub mod keys;
pub mod outcome;
pub mod problem;
pub mod provider;

// Re-export commonly used types
pub use keys::ApiKeySet;
pub use outcome::{CouncilOutcome, ProviderAnswer};
pub use problem::Problem;
pub use provider::{Provider, UnknownProvider};
