//! Outbound response models

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use copra_consul_client::PropertyMap;
use copra_core::{ServiceDiff, TransferOutcome};

/// Response of `GET /api/v1/consul/properties`
#[derive(Debug, Serialize)]
pub struct PropertiesResponse {
    pub message: String,
    pub data: HashMap<String, PropertyMap>,
    pub setup_name: String,
    pub service_names: Vec<String>,
}

/// Per-service outcome of a bulk property write
#[derive(Debug, Serialize)]
pub struct WriteResult {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_keys: Option<BTreeMap<String, String>>,
}

impl WriteResult {
    pub fn from_failures(failed_keys: BTreeMap<String, String>) -> Self {
        if failed_keys.is_empty() {
            WriteResult {
                status: "success",
                failed_keys: None,
            }
        } else {
            WriteResult {
                status: "partial",
                failed_keys: Some(failed_keys),
            }
        }
    }
}

/// Response of `POST /api/v1/consul/properties`
#[derive(Debug, Serialize)]
pub struct SetPropertiesResponse {
    pub message: String,
    pub results: HashMap<String, WriteResult>,
    pub setup_name: String,
    pub service_names: Vec<String>,
}

/// Response of `GET /api/v1/consul/properties/compare`
#[derive(Debug, Serialize)]
pub struct CompareResponse {
    pub source_setup: String,
    pub destination_setup: String,
    pub results: HashMap<String, ServiceDiff>,
}

/// Response of `POST /api/v1/consul/properties/transfer`
#[derive(Debug, Serialize)]
pub struct TransferResponse {
    pub message: String,
    pub source_setup: String,
    pub destination_setup: String,
    pub results: HashMap<String, TransferOutcome>,
}
