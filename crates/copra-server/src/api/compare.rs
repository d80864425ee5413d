//! Property comparison between two setups

use std::collections::HashMap;

use actix_web::{HttpResponse, web};
use tracing::info;

use copra_common::is_valid;
use copra_consul_client::{ConsulClientFactory, KvError, PropertyMap};
use copra_core::{ServiceDiff, ServiceSelection, diff_service, invalid_names, union_preserving_order};

use crate::error::ApiError;
use crate::model::request::CompareQuery;
use crate::model::response::CompareResponse;

/// `GET /api/v1/consul/properties/compare`
///
/// `service_name` may be a single name, a comma-separated list, or `all`
/// (the union of services known to either setup).
pub async fn compare_properties(
    factory: web::Data<ConsulClientFactory>,
    query: web::Query<CompareQuery>,
) -> Result<HttpResponse, ApiError> {
    let source_setup = query.source_setup.trim().to_string();
    let destination_setup = query.destination_setup.trim().to_string();
    if source_setup.is_empty()
        || destination_setup.is_empty()
        || query.service_name.trim().is_empty()
    {
        return Err(ApiError::BadRequest(
            "All three 'source_setup', 'destination_setup', and 'service_name' query parameters are required.".to_string(),
        ));
    }
    for setup in [&source_setup, &destination_setup] {
        if !is_valid(setup) {
            return Err(ApiError::BadRequest(format!(
                "Invalid setup name '{}'.",
                setup
            )));
        }
    }

    let source_client = factory.setup_client(&source_setup);
    if !source_client.validate_setup().await {
        return Err(ApiError::NotFound(format!(
            "Error: Source setup '{}' is not accessible.",
            source_setup
        )));
    }
    let dest_client = factory.setup_client(&destination_setup);
    if !dest_client.validate_setup().await {
        return Err(ApiError::NotFound(format!(
            "Error: Destination setup '{}' is not accessible.",
            destination_setup
        )));
    }

    let source_services = source_client.list_services().await?;
    let dest_services = dest_client.list_services().await?;

    let service_names = match ServiceSelection::parse(&query.service_name) {
        ServiceSelection::All => {
            let union = union_preserving_order(&source_services, &dest_services);
            if union.is_empty() {
                return Err(ApiError::NotFound(
                    "No services found in either setup".to_string(),
                ));
            }
            union
        }
        ServiceSelection::Named(names) => {
            let invalid =
                invalid_names(&names, &[source_services.as_slice(), dest_services.as_slice()]);
            if !invalid.is_empty() {
                return Err(ApiError::NotFound(format!(
                    "Error: Services not found in either setup: {}",
                    invalid.join(", ")
                )));
            }
            names
        }
    };

    let mut results = HashMap::new();
    for service in &service_names {
        let source_properties =
            match fetch_side(&factory, &source_setup, service).await? {
                Ok(properties) => properties,
                Err(entry) => {
                    results.insert(service.clone(), entry);
                    continue;
                }
            };
        let dest_properties =
            match fetch_side(&factory, &destination_setup, service).await? {
                Ok(properties) => properties,
                Err(entry) => {
                    results.insert(service.clone(), entry);
                    continue;
                }
            };

        results.insert(
            service.clone(),
            diff_service(
                service,
                &source_properties,
                &dest_properties,
                &source_setup,
                &destination_setup,
            ),
        );
    }

    info!(
        "compared {} services between '{}' and '{}'",
        results.len(),
        source_setup,
        destination_setup
    );
    Ok(HttpResponse::Ok().json(CompareResponse {
        source_setup,
        destination_setup,
        results,
    }))
}

// A setup dropping out mid-request becomes an explicit per-service error
// entry (the inner Err) instead of being mistaken for "no properties".
// Other store failures abort the whole request.
async fn fetch_side(
    factory: &ConsulClientFactory,
    setup: &str,
    service: &str,
) -> Result<Result<PropertyMap, ServiceDiff>, ApiError> {
    match factory.client(setup, service).get_all_keys().await {
        Ok(properties) => Ok(Ok(properties)),
        Err(KvError::Unreachable { setup, .. }) => Ok(Err(ServiceDiff::Unreachable {
            service: service.to_string(),
            setup,
        })),
        Err(other) => Err(ApiError::Internal(format!("Error: {}", other))),
    }
}
