//! Bulk property transfer between two setups

use std::collections::HashMap;

use actix_web::{HttpResponse, web};
use tracing::info;

use copra_consul_client::ConsulClientFactory;
use copra_core::{invalid_names, transfer_service};

use copra_common::{is_valid, split_service_names};

use crate::error::ApiError;
use crate::model::request::TransferRequest;
use crate::model::response::TransferResponse;

/// `POST /api/v1/consul/properties/transfer`
///
/// `service_name` is a single name or comma-separated list; the wildcard
/// `all` is not supported here. Names are validated against the source
/// setup's service list only.
pub async fn transfer_properties(
    factory: web::Data<ConsulClientFactory>,
    body: web::Json<TransferRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = body.into_inner();
    let source_setup = request.source_setup.trim().to_string();
    let destination_setup = request.destination_setup.trim().to_string();
    if source_setup.is_empty()
        || destination_setup.is_empty()
        || request.service_name.trim().is_empty()
    {
        return Err(ApiError::BadRequest(
            "All three 'source_setup', 'destination_setup', and 'service_name' are required in the request body.".to_string(),
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
    if !factory
        .setup_client(&destination_setup)
        .validate_setup()
        .await
    {
        return Err(ApiError::NotFound(format!(
            "Error: Destination setup '{}' is not accessible.",
            destination_setup
        )));
    }

    let source_services = source_client.list_services().await?;
    let service_names = split_service_names(&request.service_name);

    let invalid = invalid_names(&service_names, &[source_services.as_slice()]);
    if !invalid.is_empty() {
        return Err(ApiError::NotFound(format!(
            "Error: Services not found in source setup: {}",
            invalid.join(", ")
        )));
    }

    let mut results = HashMap::new();
    for service in &service_names {
        let outcome = transfer_service(
            &factory.client(&source_setup, service),
            &factory.client(&destination_setup, service),
        )
        .await;
        results.insert(service.clone(), outcome);
    }

    info!(
        "transferred {} services from '{}' to '{}'",
        results.len(),
        source_setup,
        destination_setup
    );
    Ok(HttpResponse::Ok().json(TransferResponse {
        message: format!(
            "Transferred properties from '{}' to '{}'",
            source_setup, destination_setup
        ),
        source_setup,
        destination_setup,
        results,
    }))
}
