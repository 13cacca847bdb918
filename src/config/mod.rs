//! Configuration module for Price Tracker
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use price_tracker::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Tracking {} URLs", config.targets.urls.len());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{CategoryConfig, Config, FetcherConfig, OutputConfig, TargetsConfig};

// Re-export parser functions
pub use parser::{config_digest, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
