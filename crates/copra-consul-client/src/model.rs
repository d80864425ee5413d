//! Consul KV wire models

use std::collections::HashMap;

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};

/// All configuration entries under one (setup, service) pair.
///
/// Never contains an empty-string (or whitespace-only) key; such keys
/// from the underlying store are filtered out when a map is built.
pub type PropertyMap = HashMap<String, String>;

/// One entry of a `?recurse=true` KV listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KvPair {
    #[serde(rename = "Key")]
    pub key: String,

    /// Base64-encoded value; directory entries carry no value
    #[serde(rename = "Value")]
    pub value: Option<String>,
}

impl KvPair {
    /// Final path segment of the full key
    pub fn property_name(&self) -> &str {
        self.key.rsplit('/').next().unwrap_or(&self.key)
    }

    /// Decode the base64 value to a UTF-8 string; a missing value
    /// decodes to the empty string
    pub fn decoded_value(&self) -> Result<String, String> {
        match &self.value {
            Some(encoded) => {
                let bytes = BASE64
                    .decode(encoded)
                    .map_err(|e| format!("invalid base64: {}", e))?;
                String::from_utf8(bytes).map_err(|e| format!("invalid utf-8: {}", e))
            }
            None => Ok(String::new()),
        }
    }
}
