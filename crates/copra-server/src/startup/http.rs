//! HTTP server setup

use actix_cors::Cors;
use actix_web::{App, HttpServer, dev::Server, middleware::Logger, web};

use copra_consul_client::ConsulClientFactory;

use crate::api;

/// Creates and binds the API server.
///
/// CORS is permissive; the API is an internal tool fronted by browser
/// consoles on other origins.
pub fn api_server(
    factory: ConsulClientFactory,
    address: String,
    port: u16,
) -> Result<Server, std::io::Error> {
    Ok(HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .app_data(web::Data::new(factory.clone()))
            .service(api::route::routes())
    })
    .bind((address, port))?
    .run())
}
