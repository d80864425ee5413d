//! Diff engine
//!
//! Structural comparison of two [`PropertyMap`]s for one service. The
//! serialized form keys the exclusive sets by setup name
//! (`exclusive_to_{setup}`) and labels each value mismatch with both
//! setup names, matching the API's response contract.

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use copra_consul_client::PropertyMap;

/// Comparison of one service's properties between two setups
#[derive(Debug, Clone)]
pub struct DiffResult {
    pub source_label: String,
    pub dest_label: String,
    /// Keys present only in the source setup
    pub exclusive_to_source: PropertyMap,
    /// Keys present only in the destination setup
    pub exclusive_to_dest: PropertyMap,
    /// Keys present in both with differing values, key -> (source, dest)
    pub mismatched: BTreeMap<String, (String, String)>,
}

impl DiffResult {
    /// True when the two maps agreed on every key
    pub fn is_clean(&self) -> bool {
        self.exclusive_to_source.is_empty()
            && self.exclusive_to_dest.is_empty()
            && self.mismatched.is_empty()
    }
}

/// Per-service entry of a compare response
#[derive(Debug, Clone)]
pub enum ServiceDiff {
    /// Neither setup has any properties for the service
    Missing { service: String },
    /// A setup stopped answering while this service was being fetched
    Unreachable { service: String, setup: String },
    Diff(DiffResult),
}

/// Compare two property maps with exact string comparison.
pub fn diff(
    source: &PropertyMap,
    dest: &PropertyMap,
    source_label: &str,
    dest_label: &str,
) -> DiffResult {
    let mut exclusive_to_source = PropertyMap::new();
    let mut exclusive_to_dest = PropertyMap::new();
    let mut mismatched = BTreeMap::new();

    for (key, value) in source {
        match dest.get(key) {
            None => {
                exclusive_to_source.insert(key.clone(), value.clone());
            }
            Some(other) if other != value => {
                mismatched.insert(key.clone(), (value.clone(), other.clone()));
            }
            Some(_) => {}
        }
    }
    for (key, value) in dest {
        if !source.contains_key(key) {
            exclusive_to_dest.insert(key.clone(), value.clone());
        }
    }

    DiffResult {
        source_label: source_label.to_string(),
        dest_label: dest_label.to_string(),
        exclusive_to_source,
        exclusive_to_dest,
        mismatched,
    }
}

/// Compare one service between two setups, distinguishing "present but
/// identical" from "absent everywhere".
pub fn diff_service(
    service: &str,
    source: &PropertyMap,
    dest: &PropertyMap,
    source_label: &str,
    dest_label: &str,
) -> ServiceDiff {
    if source.is_empty() && dest.is_empty() {
        return ServiceDiff::Missing {
            service: service.to_string(),
        };
    }
    ServiceDiff::Diff(diff(source, dest, source_label, dest_label))
}

// Value mismatch rendered as {source_label: v1, dest_label: v2}
struct LabeledValues<'a> {
    source_label: &'a str,
    dest_label: &'a str,
    values: &'a (String, String),
}

impl Serialize for LabeledValues<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(self.source_label, &self.values.0)?;
        map.serialize_entry(self.dest_label, &self.values.1)?;
        map.end()
    }
}

impl Serialize for DiffResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mismatched: BTreeMap<&str, LabeledValues<'_>> = self
            .mismatched
            .iter()
            .map(|(key, values)| {
                (
                    key.as_str(),
                    LabeledValues {
                        source_label: &self.source_label,
                        dest_label: &self.dest_label,
                        values,
                    },
                )
            })
            .collect();

        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry(
            &format!("exclusive_to_{}", self.source_label),
            &self.exclusive_to_source,
        )?;
        map.serialize_entry(
            &format!("exclusive_to_{}", self.dest_label),
            &self.exclusive_to_dest,
        )?;
        map.serialize_entry("common_keys_with_different_values", &mismatched)?;
        map.end()
    }
}

impl Serialize for ServiceDiff {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ServiceDiff::Missing { service } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("status", "error")?;
                map.serialize_entry(
                    "message",
                    &format!("Service '{}' does not exist in either setup", service),
                )?;
                map.end()
            }
            ServiceDiff::Unreachable { service, setup } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("status", "error")?;
                map.serialize_entry(
                    "message",
                    &format!(
                        "Setup '{}' was unreachable while comparing service '{}'",
                        setup, service
                    ),
                )?;
                map.end()
            }
            ServiceDiff::Diff(result) => result.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, &str)]) -> PropertyMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_diff_of_identical_maps_is_clean() {
        let a = map(&[("timeout", "30"), ("retries", "3")]);
        let result = diff(&a, &a, "prod", "stage");
        assert!(result.is_clean());
    }

    #[test]
    fn test_diff_partitions_the_key_union() {
        let source = map(&[("a", "1"), ("b", "2"), ("c", "3")]);
        let dest = map(&[("b", "9"), ("c", "3"), ("d", "4")]);
        let result = diff(&source, &dest, "prod", "stage");

        // Exclusive sets are disjoint
        for key in result.exclusive_to_source.keys() {
            assert!(!result.exclusive_to_dest.contains_key(key));
        }
        // Mismatches only on shared keys with unequal values
        for (key, (sv, dv)) in &result.mismatched {
            assert_eq!(source.get(key), Some(sv));
            assert_eq!(dest.get(key), Some(dv));
            assert_ne!(sv, dv);
        }
        // Exclusive + common covers the union
        let mut covered: Vec<&String> = result
            .exclusive_to_source
            .keys()
            .chain(result.exclusive_to_dest.keys())
            .collect();
        let common: Vec<&String> = source.keys().filter(|k| dest.contains_key(*k)).collect();
        covered.extend(common);
        let mut union: Vec<&String> = source.keys().chain(dest.keys()).collect();
        union.sort();
        union.dedup();
        covered.sort();
        covered.dedup();
        assert_eq!(covered, union);
    }

    #[test]
    fn test_both_empty_is_missing_not_empty_diff() {
        let empty = PropertyMap::new();
        let result = diff_service("ghost", &empty, &empty, "prod", "stage");
        assert!(matches!(result, ServiceDiff::Missing { ref service } if service == "ghost"));
    }

    #[test]
    fn test_one_sided_service_is_a_diff_not_missing() {
        let source = map(&[("a", "1")]);
        let result = diff_service("auth", &source, &PropertyMap::new(), "prod", "stage");
        assert!(matches!(result, ServiceDiff::Diff(_)));
    }

    #[test]
    fn test_prod_stage_scenario() {
        let prod = map(&[("timeout", "30")]);
        let stage = map(&[("timeout", "60"), ("retries", "3")]);
        let result = diff(&prod, &stage, "prod", "stage");

        assert!(result.exclusive_to_source.is_empty());
        assert_eq!(result.exclusive_to_dest, map(&[("retries", "3")]));
        assert_eq!(
            result.mismatched.get("timeout"),
            Some(&("30".to_string(), "60".to_string()))
        );

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["exclusive_to_stage"]["retries"], "3");
        assert_eq!(
            json["exclusive_to_prod"],
            serde_json::json!({})
        );
        assert_eq!(
            json["common_keys_with_different_values"]["timeout"],
            serde_json::json!({ "prod": "30", "stage": "60" })
        );
    }

    #[test]
    fn test_missing_entry_serialization() {
        let entry = ServiceDiff::Missing {
            service: "ghost".to_string(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(
            json["message"],
            "Service 'ghost' does not exist in either setup"
        );
    }

    #[test]
    fn test_values_equal_after_trim_still_mismatch() {
        // Exact string comparison, no normalization
        let source = map(&[("k", "v")]);
        let dest = map(&[("k", "v ")]);
        let result = diff(&source, &dest, "a", "b");
        assert_eq!(result.mismatched.len(), 1);
    }
}
