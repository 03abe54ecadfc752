//! Configuration file loading for ai-council
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./council.toml` or `./.council.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/ai-council/config.toml`
//! 4. Fallback: `~/.config/ai-council/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{FileConfig, FileServerConfig, FileUpstreamConfig};
pub use loader::ConfigLoader;
