//! Configuration module
//!
//! Loads, parses, and validates TOML configuration files. Every setting has a
//! default, so the binary also runs without a config file.

mod parser;
mod types;
mod validation;

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use types::{Config, CrawlerConfig, IndexConfig, SpellingConfig};
