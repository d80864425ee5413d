//! Copra Consul Client - HTTP client SDK for per-setup Consul KV access
//!
//! A `ConsulClientFactory` holds one shared `reqwest::Client` plus the
//! resolved address settings; each request handler asks it for short-lived
//! `ConsulKvClient` values scoped to one (setup, service) pair.

pub mod client;
pub mod config;
pub mod error;
pub mod model;

pub use client::{ConsulClientFactory, ConsulKvClient};
pub use config::ConsulClientConfig;
pub use error::KvError;
pub use model::{KvPair, PropertyMap};
