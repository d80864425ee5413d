//! Inbound request models

use std::collections::HashMap;

use serde::Deserialize;

use copra_consul_client::PropertyMap;

/// Query parameters for `GET /api/v1/consul/properties`
#[derive(Debug, Deserialize)]
pub struct PropertiesQuery {
    pub setup_name: String,
    pub service_name: String,
}

/// Body of `POST /api/v1/consul/properties`
#[derive(Debug, Deserialize)]
pub struct SetPropertiesRequest {
    pub setup_name: String,
    pub service_name: String,
    #[serde(default)]
    pub data: HashMap<String, PropertyMap>,
}

/// Query parameters for `GET /api/v1/consul/properties/compare`
#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    pub source_setup: String,
    pub destination_setup: String,
    pub service_name: String,
}

/// Body of `POST /api/v1/consul/properties/transfer`
#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    pub source_setup: String,
    pub destination_setup: String,
    pub service_name: String,
}
