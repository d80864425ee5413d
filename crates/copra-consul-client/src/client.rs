//! Consul KV client
//!
//! `ConsulClientFactory` owns the shared `reqwest::Client`;
//! `ConsulKvClient` is the short-lived per-(setup, service) handle the
//! request handlers actually talk through.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use copra_common::CONFIG_PREFIX;

use crate::config::ConsulClientConfig;
use crate::error::KvError;
use crate::model::{KvPair, PropertyMap};

/// Factory for per-(setup, service) KV clients
#[derive(Clone)]
pub struct ConsulClientFactory {
    client: Client,
    config: ConsulClientConfig,
}

impl ConsulClientFactory {
    /// Build the shared HTTP client with the configured timeouts
    pub fn new(config: ConsulClientConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .timeout(Duration::from_millis(config.read_timeout_ms))
            .build()?;

        Ok(Self { client, config })
    }

    /// Create a client scoped to one (setup, service) pair
    pub fn client(&self, setup: &str, service: &str) -> ConsulKvClient {
        ConsulKvClient {
            client: self.client.clone(),
            base_url: self.config.base_url(setup),
            setup: setup.to_string(),
            service: service.to_string(),
            probe_timeout: Duration::from_millis(self.config.probe_timeout_ms),
        }
    }

    /// Create a client scoped to a setup only, for probe and listing calls
    pub fn setup_client(&self, setup: &str) -> ConsulKvClient {
        self.client(setup, "")
    }
}

/// Client for one setup's Consul KV store, scoped to one service namespace
pub struct ConsulKvClient {
    client: Client,
    base_url: String,
    setup: String,
    service: String,
    probe_timeout: Duration,
}

impl ConsulKvClient {
    /// Setup this client talks to
    pub fn setup(&self) -> &str {
        &self.setup
    }

    /// Service namespace this client is scoped to
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Issue a bounded-timeout health probe against the setup's
    /// management UI endpoint.
    ///
    /// Returns true only on a success status; any network or timeout
    /// failure yields false, never an error.
    pub async fn validate_setup(&self) -> bool {
        let url = format!("{}/ui/dc1/kv", self.base_url);
        match self
            .client
            .get(&url)
            .timeout(self.probe_timeout)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!("setup probe for '{}' failed: {}", self.setup, e);
                false
            }
        }
    }

    /// List the service namespaces present under the setup's `config/`
    /// tree, deduplicated in first-seen order.
    ///
    /// A 404 from Consul means the tree is empty and yields an empty list.
    pub async fn list_services(&self) -> Result<Vec<String>, KvError> {
        let url = format!("{}/v1/kv/{}/?keys=true", self.base_url, CONFIG_PREFIX);
        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!("listing services for '{}' failed: {}", self.setup, e);
            KvError::unreachable(&self.setup, e)
        })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        if !response.status().is_success() {
            return Err(self.api_error(response).await);
        }

        let keys: Vec<String> = response
            .json()
            .await
            .map_err(|e| KvError::unreachable(&self.setup, e))?;

        let mut services = Vec::new();
        for key in &keys {
            let mut parts = key.split('/');
            if parts.next() != Some(CONFIG_PREFIX) {
                continue;
            }
            match parts.next() {
                Some(service) if !service.is_empty() => {
                    if !services.iter().any(|s| s == service) {
                        services.push(service.to_string());
                    }
                }
                _ => {}
            }
        }

        Ok(services)
    }

    /// Fetch every property under `config/{service}` as a decoded map.
    ///
    /// Keys are stripped to their final path segment; whitespace-only
    /// keys (directory entries) are discarded. A 404 means the service
    /// has no properties and yields an empty map.
    pub async fn get_all_keys(&self) -> Result<PropertyMap, KvError> {
        let url = format!(
            "{}/v1/kv/{}/{}?recurse=true",
            self.base_url, CONFIG_PREFIX, self.service
        );
        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!(
                "fetching keys for '{}' in '{}' failed: {}",
                self.service, self.setup, e
            );
            KvError::unreachable(&self.setup, e)
        })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(PropertyMap::new());
        }
        if !response.status().is_success() {
            return Err(self.api_error(response).await);
        }

        let pairs: Vec<KvPair> = response
            .json()
            .await
            .map_err(|e| KvError::unreachable(&self.setup, e))?;

        let mut properties = PropertyMap::new();
        for pair in &pairs {
            let name = pair.property_name();
            if name.trim().is_empty() {
                continue;
            }
            let value = pair.decoded_value().map_err(|reason| KvError::Decode {
                key: pair.key.clone(),
                reason,
            })?;
            properties.insert(name.to_string(), value);
        }

        Ok(properties)
    }

    /// Write one property under `config/{service}/{key}`
    pub async fn set_key_value(&self, key: &str, value: &str) -> Result<(), KvError> {
        let url = format!(
            "{}/v1/kv/{}/{}/{}",
            self.base_url, CONFIG_PREFIX, self.service, key
        );
        let response = self
            .client
            .put(&url)
            .body(value.to_string())
            .send()
            .await
            .map_err(|e| {
                warn!(
                    "writing '{}' for '{}' in '{}' failed: {}",
                    key, self.service, self.setup, e
                );
                KvError::unreachable(&self.setup, e)
            })?;

        if !response.status().is_success() {
            return Err(self.api_error(response).await);
        }

        Ok(())
    }

    async fn api_error(&self, response: reqwest::Response) -> KvError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        warn!(
            "setup '{}' answered HTTP {} for '{}': {}",
            self.setup, status, self.service, body
        );
        KvError::Api {
            setup: self.setup.clone(),
            status,
            body,
        }
    }
}
