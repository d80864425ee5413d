//! Client configuration

/// Configuration for the Consul client factory
#[derive(Clone, Debug)]
pub struct ConsulClientConfig {
    /// Base-URL template with a `{setup}` placeholder,
    /// e.g. `https://{setup}-consul.greymatter.greyorange.com`
    pub address_template: String,
    /// Connection timeout in milliseconds
    pub connect_timeout_ms: u64,
    /// Read timeout in milliseconds
    pub read_timeout_ms: u64,
    /// Timeout for the setup health probe in milliseconds
    pub probe_timeout_ms: u64,
}

impl Default for ConsulClientConfig {
    fn default() -> Self {
        Self {
            address_template: "https://{setup}-consul.greymatter.greyorange.com".to_string(),
            connect_timeout_ms: 5000,
            read_timeout_ms: 30000,
            probe_timeout_ms: 5000,
        }
    }
}

impl ConsulClientConfig {
    /// Create a new config with the given address template
    pub fn new(address_template: &str) -> Self {
        Self {
            address_template: address_template.to_string(),
            ..Default::default()
        }
    }

    /// Set connect/read timeouts
    pub fn with_timeouts(mut self, connect_ms: u64, read_ms: u64) -> Self {
        self.connect_timeout_ms = connect_ms;
        self.read_timeout_ms = read_ms;
        self
    }

    /// Set the health-probe timeout
    pub fn with_probe_timeout(mut self, probe_ms: u64) -> Self {
        self.probe_timeout_ms = probe_ms;
        self
    }

    /// Resolve the base URL for one setup
    pub fn base_url(&self, setup: &str) -> String {
        self.address_template.replace("{setup}", setup)
    }
}
