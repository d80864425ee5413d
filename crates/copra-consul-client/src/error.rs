//! KV client error types
//!
//! Failures are typed so callers can tell an absent service (an `Ok`
//! empty result — Consul answers 404 for a missing prefix) from a store
//! that could not be reached at all.

/// Errors produced by [`crate::ConsulKvClient`] operations
#[derive(thiserror::Error, Debug)]
pub enum KvError {
    #[error("setup '{setup}' is not reachable: {reason}")]
    Unreachable { setup: String, reason: String },

    #[error("setup '{setup}' answered HTTP {status}: {body}")]
    Api {
        setup: String,
        status: u16,
        body: String,
    },

    #[error("undecodable value for key '{key}': {reason}")]
    Decode { key: String, reason: String },
}

impl KvError {
    /// Map a reqwest transport failure to `Unreachable` for one setup
    pub fn unreachable(setup: &str, err: reqwest::Error) -> Self {
        KvError::Unreachable {
            setup: setup.to_string(),
            reason: err.to_string(),
        }
    }

    /// The setup this error names, when it names one
    pub fn setup(&self) -> Option<&str> {
        match self {
            KvError::Unreachable { setup, .. } | KvError::Api { setup, .. } => Some(setup),
            KvError::Decode { .. } => None,
        }
    }
}
