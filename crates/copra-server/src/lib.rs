//! Copra server - HTTP API over per-setup Consul KV stores
//!
//! Reads and writes configuration properties per (setup, service) pair
//! and offers two derived operations: bulk transfer of a service's
//! properties between setups, and a structural diff of properties
//! between setups.

pub mod api;
pub mod error;
pub mod model;
pub mod startup;
