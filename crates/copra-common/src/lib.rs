//! Copra Common - shared constants and helpers
//!
//! This crate provides the small set of definitions used across all
//! Copra components:
//! - Consul KV tree constants
//! - Identifier validation
//! - Service-name list parsing

pub mod utils;

pub use utils::{is_valid, split_service_names};

/// Root prefix of the configuration tree in every setup's KV store
pub const CONFIG_PREFIX: &str = "config";

/// Wildcard service name selecting every known service
pub const ALL_SERVICES: &str = "all";

/// Query/body parameter names
pub const SETUP_NAME: &str = "setup_name";
pub const SERVICE_NAME: &str = "service_name";
pub const SOURCE_SETUP: &str = "source_setup";
pub const DESTINATION_SETUP: &str = "destination_setup";
