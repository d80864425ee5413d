// API route configuration

use actix_web::web;

use super::{compare, properties, transfer};

/// Configure the Consul properties API routes
pub fn routes() -> actix_web::Scope {
    web::scope("/api/v1/consul")
        .route("/properties", web::get().to(properties::get_properties))
        .route("/properties", web::post().to(properties::set_properties))
        .route(
            "/properties/compare",
            web::get().to(compare::compare_properties),
        )
        .route(
            "/properties/transfer",
            web::post().to(transfer::transfer_properties),
        )
}
