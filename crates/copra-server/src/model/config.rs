//! Configuration management for the Copra server
//!
//! Settings are loaded from `conf/application.yml`, `COPRA_`-prefixed
//! environment variables, and command-line overrides, in that order of
//! precedence (later wins).

use clap::Parser;
use config::{Config, Environment};

use copra_consul_client::ConsulClientConfig;

use crate::startup::logging::LoggingConfig;

const DEFAULT_ADDRESS: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5003;
const DEFAULT_ADDRESS_TEMPLATE: &str = "https://{setup}-consul.greymatter.greyorange.com";

/// Command line arguments for the server
#[derive(Debug, Parser)]
#[command(name = "copra-server")]
struct Cli {
    #[arg(short = 'a', long = "address")]
    address: Option<String>,
    #[arg(short = 'p', long = "port")]
    port: Option<u16>,
    #[arg(long = "address-template", env = "COPRA_ADDRESS_TEMPLATE")]
    address_template: Option<String>,
}

/// Application configuration loaded from config file and environment
#[derive(Clone, Debug, Default)]
pub struct Configuration {
    pub config: Config,
}

impl Configuration {
    pub fn new() -> anyhow::Result<Self> {
        let args = Cli::parse();
        let mut config_builder = Config::builder()
            .add_source(
                Environment::with_prefix("copra")
                    .separator(".")
                    .try_parsing(true),
            )
            .add_source(config::File::with_name("conf/application.yml").required(false));

        if let Some(v) = args.address {
            config_builder = config_builder.set_override("server.address", v)?;
        }
        if let Some(v) = args.port {
            config_builder = config_builder.set_override("server.port", v as i64)?;
        }
        if let Some(v) = args.address_template {
            config_builder = config_builder.set_override("consul.address_template", v)?;
        }

        let config = config_builder.build()?;

        Ok(Configuration { config })
    }

    pub fn server_address(&self) -> String {
        self.config
            .get_string("server.address")
            .unwrap_or(DEFAULT_ADDRESS.to_string())
    }

    pub fn server_port(&self) -> u16 {
        self.config
            .get_int("server.port")
            .ok()
            .and_then(|port| u16::try_from(port).ok())
            .unwrap_or(DEFAULT_PORT)
    }

    pub fn address_template(&self) -> String {
        self.config
            .get_string("consul.address_template")
            .unwrap_or(DEFAULT_ADDRESS_TEMPLATE.to_string())
    }

    pub fn connect_timeout_ms(&self) -> u64 {
        self.config
            .get_int("consul.connect_timeout_ms")
            .map(|v| v as u64)
            .unwrap_or(5000)
    }

    pub fn read_timeout_ms(&self) -> u64 {
        self.config
            .get_int("consul.read_timeout_ms")
            .map(|v| v as u64)
            .unwrap_or(30000)
    }

    pub fn probe_timeout_ms(&self) -> u64 {
        self.config
            .get_int("consul.probe_timeout_ms")
            .map(|v| v as u64)
            .unwrap_or(5000)
    }

    pub fn consul_client_config(&self) -> ConsulClientConfig {
        ConsulClientConfig::new(&self.address_template())
            .with_timeouts(self.connect_timeout_ms(), self.read_timeout_ms())
            .with_probe_timeout(self.probe_timeout_ms())
    }

    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            dir: self
                .config
                .get_string("logging.dir")
                .unwrap_or("logs".to_string())
                .into(),
            file_enabled: self.config.get_bool("logging.file_enabled").unwrap_or(false),
        }
    }
}
