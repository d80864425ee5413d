//! GET/POST handlers for per-setup service properties

use std::collections::HashMap;

use actix_web::{HttpResponse, web};
use tracing::info;

use copra_common::is_valid;
use copra_consul_client::ConsulClientFactory;
use copra_core::{ServiceSelection, invalid_names, write_properties};

use crate::error::ApiError;
use crate::model::request::{PropertiesQuery, SetPropertiesRequest};
use crate::model::response::{PropertiesResponse, SetPropertiesResponse, WriteResult};

/// `GET /api/v1/consul/properties?setup_name=&service_name=`
///
/// `service_name` may be a single name, a comma-separated list, or `all`.
pub async fn get_properties(
    factory: web::Data<ConsulClientFactory>,
    query: web::Query<PropertiesQuery>,
) -> Result<HttpResponse, ApiError> {
    let setup_name = query.setup_name.trim().to_string();
    if setup_name.is_empty() || query.service_name.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Both 'setup_name' and 'service_name' query parameters are required.".to_string(),
        ));
    }
    // Setup names are substituted into the store URL
    if !is_valid(&setup_name) {
        return Err(ApiError::BadRequest(format!(
            "Invalid setup name '{}'.",
            setup_name
        )));
    }

    let setup_client = factory.setup_client(&setup_name);
    if !setup_client.validate_setup().await {
        return Err(ApiError::NotFound(format!(
            "Error: Setup '{}' is not accessible.",
            setup_name
        )));
    }

    let available_services = setup_client.list_services().await?;

    match ServiceSelection::parse(&query.service_name) {
        ServiceSelection::All => {
            if available_services.is_empty() {
                return Err(ApiError::NotFound(format!(
                    "No services found in setup '{}'",
                    setup_name
                )));
            }

            let mut data = HashMap::new();
            let mut service_names = Vec::new();
            for service in &available_services {
                let properties = factory.client(&setup_name, service).get_all_keys().await?;
                if !properties.is_empty() {
                    service_names.push(service.clone());
                    data.insert(service.clone(), properties);
                }
            }

            info!(
                "fetched properties of all {} services in '{}'",
                data.len(),
                setup_name
            );
            Ok(HttpResponse::Ok().json(PropertiesResponse {
                message: format!("All Consul Variables Fetched for {} services", data.len()),
                data,
                setup_name,
                service_names,
            }))
        }
        ServiceSelection::Named(service_names) => {
            let invalid = invalid_names(&service_names, &[available_services.as_slice()]);
            if !invalid.is_empty() {
                return Err(ApiError::NotFound(format!(
                    "Error: Services not found: {}",
                    invalid.join(", ")
                )));
            }

            let mut data = HashMap::new();
            for service in &service_names {
                let properties = factory.client(&setup_name, service).get_all_keys().await?;
                data.insert(service.clone(), properties);
            }

            Ok(HttpResponse::Ok().json(PropertiesResponse {
                message: "All Consul Variables Fetched".to_string(),
                data,
                setup_name,
                service_names,
            }))
        }
    }
}

/// `POST /api/v1/consul/properties`
///
/// Writes every key under every service named in `data`. Per-key write
/// failures are collected and reported with a `partial` status.
pub async fn set_properties(
    factory: web::Data<ConsulClientFactory>,
    body: web::Json<SetPropertiesRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = body.into_inner();
    let setup_name = request.setup_name.trim().to_string();
    if setup_name.is_empty() || request.service_name.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Both 'setup_name' and 'service_name' are required in the request body.".to_string(),
        ));
    }
    if !is_valid(&setup_name) {
        return Err(ApiError::BadRequest(format!(
            "Invalid setup name '{}'.",
            setup_name
        )));
    }

    let setup_client = factory.setup_client(&setup_name);
    if !setup_client.validate_setup().await {
        return Err(ApiError::NotFound(format!(
            "Error: Setup '{}' is not accessible.",
            setup_name
        )));
    }

    if request.data.is_empty() {
        return Err(ApiError::BadRequest(
            "Invalid input. Expecting a dictionary of services and their properties.".to_string(),
        ));
    }

    let mut results = HashMap::new();
    let mut service_names = Vec::new();
    for (service, properties) in &request.data {
        let client = factory.client(&setup_name, service);
        let failed_keys = write_properties(&client, properties).await;
        info!(
            "wrote {} properties for '{}' in '{}' ({} failed)",
            properties.len(),
            service,
            setup_name,
            failed_keys.len()
        );
        results.insert(service.clone(), WriteResult::from_failures(failed_keys));
        service_names.push(service.clone());
    }

    Ok(HttpResponse::Ok().json(SetPropertiesResponse {
        message: "Consul Properties Updated".to_string(),
        results,
        setup_name,
        service_names,
    }))
}
