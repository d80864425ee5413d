//! Transfer engine
//!
//! Sequential bulk copy of one service's properties from a source setup
//! to a destination setup. Writes are independent; there is no rollback,
//! and a copy that fails midway leaves the destination in whatever
//! partial state the completed writes produced. Per-key failures are
//! collected and reported instead of being folded into a blanket
//! success.

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::{info, warn};

use copra_consul_client::{ConsulKvClient, KvError, PropertyMap};

/// Result of copying one service between setups
#[derive(Debug, Clone)]
pub enum TransferOutcome {
    /// The source setup holds no properties for this service
    NoProperties,
    /// The source fetch failed before anything was written
    Failed { message: String },
    /// Properties were written; `failed_keys` maps key -> failure text
    Copied {
        properties: PropertyMap,
        failed_keys: BTreeMap<String, String>,
    },
}

impl TransferOutcome {
    pub fn status(&self) -> &'static str {
        match self {
            TransferOutcome::NoProperties | TransferOutcome::Failed { .. } => "error",
            TransferOutcome::Copied { failed_keys, .. } if failed_keys.is_empty() => "success",
            TransferOutcome::Copied { .. } => "partial",
        }
    }
}

/// Copy every property of the source client's service into the
/// destination client, which is scoped to the same service name.
pub async fn transfer_service(
    source: &ConsulKvClient,
    dest: &ConsulKvClient,
) -> TransferOutcome {
    let properties = match source.get_all_keys().await {
        Ok(properties) => properties,
        Err(e @ KvError::Unreachable { .. }) => {
            return TransferOutcome::Failed {
                message: e.to_string(),
            };
        }
        Err(e) => {
            warn!(
                "transfer of '{}' aborted on source fetch: {}",
                source.service(),
                e
            );
            return TransferOutcome::Failed {
                message: e.to_string(),
            };
        }
    };

    if properties.is_empty() {
        return TransferOutcome::NoProperties;
    }

    let failed_keys = write_properties(dest, &properties).await;
    info!(
        "transferred {} properties of '{}' from '{}' to '{}' ({} failed)",
        properties.len(),
        source.service(),
        source.setup(),
        dest.setup(),
        failed_keys.len()
    );

    TransferOutcome::Copied {
        properties,
        failed_keys,
    }
}

/// Write every pair into the destination client sequentially, collecting
/// per-key failures. Also used by the bulk property-set endpoint.
pub async fn write_properties(
    dest: &ConsulKvClient,
    properties: &PropertyMap,
) -> BTreeMap<String, String> {
    let mut failed_keys = BTreeMap::new();
    for (key, value) in properties {
        if let Err(e) = dest.set_key_value(key, value).await {
            failed_keys.insert(key.clone(), e.to_string());
        }
    }
    failed_keys
}

impl Serialize for TransferOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TransferOutcome::NoProperties => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("status", "error")?;
                map.serialize_entry(
                    "message",
                    "No properties found in source setup for this service",
                )?;
                map.end()
            }
            TransferOutcome::Failed { message } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("status", "error")?;
                map.serialize_entry("message", message)?;
                map.end()
            }
            TransferOutcome::Copied {
                properties,
                failed_keys,
            } => {
                let entries = if failed_keys.is_empty() { 2 } else { 3 };
                let mut map = serializer.serialize_map(Some(entries))?;
                map.serialize_entry("status", self.status())?;
                map.serialize_entry("properties", properties)?;
                if !failed_keys.is_empty() {
                    map.serialize_entry("failed_keys", failed_keys)?;
                }
                map.end()
            }
        }
    }
}
