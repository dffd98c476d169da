//! Configuration loading and management for the DROS scoring engine.
//!
//! This module loads the contest settings and the point-weight rule table
//! from YAML files, and reads the service's bind settings from the
//! environment.
//!
//! # Example
//!
//! ```no_run
//! use dros_scoring::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/dros_contest").unwrap();
//! println!("Loaded contest: {}", config.contest().name);
//! ```

mod loader;
mod server;
mod types;

pub use loader::{ConfigLoader, MAX_POINTS_DEDUCTED};
pub use server::{DEFAULT_CONFIG_DIR, ServerSettings};
pub use types::{ContestSettings, PointWeightsConfig, ScoringConfig};
