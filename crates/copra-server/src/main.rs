//! Main entry point for the Copra server.

use copra_consul_client::ConsulClientFactory;
use copra_server::{model::Configuration, startup};
use tracing::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let configuration = Configuration::new()?;

    let _logging_guard = startup::init_logging(&configuration.logging_config())?;

    let factory = ConsulClientFactory::new(configuration.consul_client_config())?;

    let address = configuration.server_address();
    let port = configuration.server_port();
    info!(
        "copra-server listening on {}:{} (template: {})",
        address,
        port,
        configuration.address_template()
    );

    startup::api_server(factory, address, port)?.await?;

    Ok(())
}
